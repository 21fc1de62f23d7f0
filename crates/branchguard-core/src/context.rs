use branchguard_config::Config;
use branchguard_store_interface::StoreService;

use crate::{permissions::PermissionCache, CoreModule};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub store_service: &'a (dyn StoreService + 'a),
    pub permission_cache: &'a PermissionCache,
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use branchguard_config::Config;
    use branchguard_store_memory::MemoryStore;

    use crate::{permissions::PermissionCache, CoreContext, CoreModule};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub store_service: MemoryStore,
        pub permission_cache: PermissionCache,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            let config = Config::from_env_no_version();
            let permission_cache = PermissionCache::new(config.permission_cache.duration());

            Self {
                config,
                core_module: CoreModule::builder().build(),
                store_service: MemoryStore::new(),
                permission_cache,
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                store_service: &self.store_service,
                permission_cache: &self.permission_cache,
            }
        }
    }
}
