use async_trait::async_trait;
use branchguard_models::{
    MembershipRole, Permission, Principal, Repository, RepositoryPath, RuleViolations,
};
use shaku::{Component, HasComponent, Interface};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    protection::{default_manager, BypassResolver, MergeVerifyInput, MergeVerifyOutput, RuleSet},
    use_cases::permissions::CheckSpacePermissionInterface,
    CoreContext, DomainError, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait VerifyPullRequestMergeInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        cancel: &CancellationToken,
        input: &MergeVerifyInput,
    ) -> Result<(MergeVerifyOutput, Vec<RuleViolations>)>;
}

#[derive(Component)]
#[shaku(interface = VerifyPullRequestMergeInterface)]
pub(crate) struct VerifyPullRequestMerge;

#[async_trait]
impl VerifyPullRequestMergeInterface for VerifyPullRequestMerge {
    #[tracing::instrument(
        skip(self, ctx, cancel, input),
        fields(
            repository = %input.target_repo.path,
            target_branch = %input.pull_req.target_branch,
            actor_id = input.actor.id
        )
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        cancel: &CancellationToken,
        input: &MergeVerifyInput,
    ) -> Result<(MergeVerifyOutput, Vec<RuleViolations>)> {
        let repository_path = parse_repository_path(&input.target_repo)?;

        let rules = ctx
            .store_service
            .rules_list_for_repository(&repository_path)
            .await?;

        let resolver = MembershipBypassResolver { ctx };
        let (output, violations) = RuleSet::new(rules, default_manager())
            .merge_verify(cancel, &resolver, input)
            .await?;

        info!(
            delete_source_branch = output.delete_source_branch,
            allowed_methods = ?output.allowed_methods,
            violations = violations.len(),
            blocked = RuleViolations::any_blocking(&violations),
            message = "Verified merge"
        );

        Ok((output, violations))
    }
}

/// Resolves bypass privileges from space memberships.
///
/// Repository owners hold the edit permission on the repository's parent space.
struct MembershipBypassResolver<'a, 'b> {
    ctx: &'b CoreContext<'a>,
}

fn parse_repository_path(repository: &Repository) -> Result<RepositoryPath> {
    repository
        .repository_path()
        .map_err(|e| DomainError::InvalidInput {
            message: e.to_string(),
        })
}

#[async_trait]
impl<'a, 'b> BypassResolver for MembershipBypassResolver<'a, 'b> {
    async fn is_repo_owner(&self, actor: &Principal, repository: &Repository) -> Result<bool> {
        let repository_path = parse_repository_path(repository)?;

        let check_permission_uc: &dyn CheckSpacePermissionInterface =
            self.ctx.core_module.resolve_ref();
        check_permission_uc
            .run(
                self.ctx,
                actor.id,
                repository_path.space(),
                Permission::RepoEdit,
            )
            .await
    }

    async fn has_space_role(
        &self,
        actor: &Principal,
        repository: &Repository,
        roles: &[MembershipRole],
    ) -> Result<bool> {
        let repository_path = parse_repository_path(repository)?;

        for space in repository_path.space().ancestors() {
            if let Some(membership) = self
                .ctx
                .store_service
                .memberships_get(&space, actor.id)
                .await?
            {
                if roles.contains(&membership.role) {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}
