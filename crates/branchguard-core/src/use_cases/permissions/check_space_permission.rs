use async_trait::async_trait;
use branchguard_models::{Permission, SpacePath};
use shaku::{Component, Interface};

use crate::{permissions::PermissionCacheKey, CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CheckSpacePermissionInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        principal_id: u64,
        space_path: &SpacePath,
        permission: Permission,
    ) -> Result<bool>;
}

#[derive(Component)]
#[shaku(interface = CheckSpacePermissionInterface)]
pub(crate) struct CheckSpacePermission;

#[async_trait]
impl CheckSpacePermissionInterface for CheckSpacePermission {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        principal_id: u64,
        space_path: &SpacePath,
        permission: Permission,
    ) -> Result<bool> {
        let key = PermissionCacheKey {
            principal_id,
            space_path: space_path.clone(),
            permission,
        };

        ctx.permission_cache.get(ctx.store_service, &key).await
    }
}
