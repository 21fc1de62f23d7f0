mod permission_cache;

pub use permission_cache::{PermissionCache, PermissionCacheKey};
