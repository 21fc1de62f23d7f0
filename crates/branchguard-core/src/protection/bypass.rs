use async_trait::async_trait;
use branchguard_models::{MembershipRole, Principal, Repository};
use serde::{Deserialize, Serialize};

use crate::{protection::DefinitionError, Result};

/// Principals allowed to bypass a rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Bypass {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<u64>,
    /// Repository owners may bypass the rule.
    #[serde(default)]
    pub repo_owners: bool,
    /// Members holding one of these roles on the repository's space, or on
    /// one of its ancestors, may bypass the rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub space_roles: Vec<MembershipRole>,
}

impl Bypass {
    pub fn sanitize(&mut self) -> Result<(), DefinitionError> {
        self.user_ids.sort_unstable();
        if let Some(w) = self.user_ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(DefinitionError::DuplicateBypassUser { user_id: w[0] });
        }

        self.space_roles.sort_unstable();
        if let Some(w) = self.space_roles.windows(2).find(|w| w[0] == w[1]) {
            return Err(DefinitionError::DuplicateBypassRole { role: w[0] });
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty() && !self.repo_owners && self.space_roles.is_empty()
    }

    pub async fn matches(
        &self,
        resolver: &dyn BypassResolver,
        actor: &Principal,
        repository: &Repository,
    ) -> Result<bool> {
        if self.user_ids.contains(&actor.id) {
            return Ok(true);
        }

        if self.repo_owners && resolver.is_repo_owner(actor, repository).await? {
            return Ok(true);
        }

        if !self.space_roles.is_empty() {
            return resolver
                .has_space_role(actor, repository, &self.space_roles)
                .await;
        }

        Ok(false)
    }
}

/// Resolves role-based bypass privileges.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait BypassResolver: Send + Sync {
    async fn is_repo_owner(&self, actor: &Principal, repository: &Repository) -> Result<bool>;

    /// Whether the actor holds one of `roles` on the repository's space or
    /// one of its ancestors.
    async fn has_space_role(
        &self,
        actor: &Principal,
        repository: &Repository,
        roles: &[MembershipRole],
    ) -> Result<bool>;
}
