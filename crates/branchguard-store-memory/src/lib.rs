use std::{
    collections::{BTreeMap, HashMap},
    sync::RwLock,
};

use async_trait::async_trait;
use branchguard_models::{Membership, RepositoryPath, Rule, RuleScope, SpacePath};
use branchguard_store_interface::{Result, StoreError, StoreService};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rules: RwLock<BTreeMap<u64, Rule>>,
    memberships: RwLock<HashMap<(String, u64), Membership>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl StoreService for MemoryStore {
    async fn rules_create(&self, mut instance: Rule) -> Result<Rule> {
        instance
            .info
            .validate()
            .map_err(|e| StoreError::InvalidRule { source: e })?;

        let scope = match instance.info.scope() {
            Ok(RuleScope::Space(path)) | Ok(RuleScope::Repository(path)) => path.to_string(),
            Err(e) => return Err(StoreError::InvalidRule { source: e }),
        };

        let mut rules = self.rules.write().unwrap();

        let duplicate = rules.values().any(|r| {
            r.info.identifier == instance.info.identifier
                && r.info.space_path == instance.info.space_path
                && r.info.repo_path == instance.info.repo_path
        });
        if duplicate {
            return Err(StoreError::DuplicateRule {
                identifier: instance.info.identifier,
                scope,
            });
        }

        if instance.info.id == 0 {
            instance.info.id = rules.keys().max().copied().unwrap_or(0) + 1;
        } else if rules.contains_key(&instance.info.id) {
            return Err(StoreError::DuplicateRuleId(instance.info.id));
        }

        rules.insert(instance.info.id, instance.clone());
        Ok(instance)
    }

    async fn rules_get(&self, id: u64) -> Result<Option<Rule>> {
        Ok(self.rules.read().unwrap().get(&id).cloned())
    }

    async fn rules_delete(&self, id: u64) -> Result<bool> {
        Ok(self.rules.write().unwrap().remove(&id).is_some())
    }

    async fn rules_all(&self) -> Result<Vec<Rule>> {
        Ok(self.rules.read().unwrap().values().cloned().collect())
    }

    async fn rules_list_for_repository(
        &self,
        repository_path: &RepositoryPath,
    ) -> Result<Vec<Rule>> {
        let rules = self.rules.read().unwrap();
        let repo_path = repository_path.full_name();

        let mut output: Vec<Rule> = rules
            .values()
            .filter(|r| r.info.repo_path == repo_path)
            .cloned()
            .collect();

        for space in repository_path.space().ancestors() {
            let space_path = space.full_name();
            output.extend(
                rules
                    .values()
                    .filter(|r| r.info.space_path == space_path)
                    .cloned(),
            );
        }

        Ok(output)
    }

    async fn memberships_create(&self, instance: Membership) -> Result<Membership> {
        SpacePath::new(&instance.space_path)
            .map_err(|_| StoreError::InvalidSpacePath(instance.space_path.clone()))?;

        self.memberships.write().unwrap().insert(
            (instance.space_path.clone(), instance.principal_id),
            instance.clone(),
        );
        Ok(instance)
    }

    async fn memberships_get(
        &self,
        space_path: &SpacePath,
        principal_id: u64,
    ) -> Result<Option<Membership>> {
        Ok(self
            .memberships
            .read()
            .unwrap()
            .get(&(space_path.full_name(), principal_id))
            .cloned())
    }

    async fn memberships_all(&self) -> Result<Vec<Membership>> {
        let mut values: Vec<_> = self.memberships.read().unwrap().values().cloned().collect();
        values.sort_by(|a, b| {
            (&a.space_path, a.principal_id).cmp(&(&b.space_path, b.principal_id))
        });
        Ok(values)
    }
}
