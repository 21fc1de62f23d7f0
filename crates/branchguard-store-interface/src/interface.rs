use async_trait::async_trait;
use branchguard_models::{Membership, RepositoryPath, Rule, SpacePath};

use crate::{Result, StoreError};

/// Persistence of protection rules and space memberships.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait StoreService: Send + Sync {
    /// Store a new rule. A zero ID is replaced by the next free ID.
    async fn rules_create(&self, instance: Rule) -> Result<Rule>;
    async fn rules_get(&self, id: u64) -> Result<Option<Rule>>;
    async fn rules_get_expect(&self, id: u64) -> Result<Rule> {
        self.rules_get(id)
            .await?
            .ok_or(StoreError::UnknownRuleId(id))
    }
    async fn rules_delete(&self, id: u64) -> Result<bool>;
    async fn rules_all(&self) -> Result<Vec<Rule>>;
    /// Rules applying to a repository: the repository's own rules first, then
    /// rules of each parent space from the nearest to the root.
    async fn rules_list_for_repository(&self, repository_path: &RepositoryPath)
        -> Result<Vec<Rule>>;

    async fn memberships_create(&self, instance: Membership) -> Result<Membership>;
    async fn memberships_get(
        &self,
        space_path: &SpacePath,
        principal_id: u64,
    ) -> Result<Option<Membership>>;
    async fn memberships_all(&self) -> Result<Vec<Membership>>;
}
