use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use branchguard_models::{Permission, SpacePath};
use branchguard_store_interface::StoreService;
use tokio::sync::RwLock;
use tracing::debug;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionCacheKey {
    pub principal_id: u64,
    pub space_path: SpacePath,
    pub permission: Permission,
}

/// Time-bounded cache of hierarchical permission checks.
///
/// A zero duration disables caching.
pub struct PermissionCache {
    duration: Duration,
    entries: RwLock<HashMap<PermissionCacheKey, (bool, Instant)>>,
}

impl PermissionCache {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, store: &dyn StoreService, key: &PermissionCacheKey) -> Result<bool> {
        if let Some(granted) = self.cached(key).await {
            return Ok(granted);
        }

        let granted = Self::resolve(store, key).await?;
        debug!(
            principal_id = key.principal_id,
            space_path = %key.space_path,
            permission = ?key.permission,
            granted = granted,
            message = "Resolved permission"
        );

        if !self.duration.is_zero() {
            let mut entries = self.entries.write().await;
            entries.retain(|_, (_, at)| at.elapsed() < self.duration);
            entries.insert(key.clone(), (granted, Instant::now()));
        }

        Ok(granted)
    }

    async fn cached(&self, key: &PermissionCacheKey) -> Option<bool> {
        if self.duration.is_zero() {
            return None;
        }

        self.entries
            .read()
            .await
            .get(key)
            .filter(|(_, at)| at.elapsed() < self.duration)
            .map(|(granted, _)| *granted)
    }

    /// Walk from the space up to the root, stopping on the first membership
    /// granting the permission.
    async fn resolve(store: &dyn StoreService, key: &PermissionCacheKey) -> Result<bool> {
        for space in key.space_path.ancestors() {
            if let Some(membership) = store.memberships_get(&space, key.principal_id).await? {
                if membership.role.has_permission(key.permission) {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}
