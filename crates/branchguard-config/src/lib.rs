//! Config module.

use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// JSON export imported at startup (empty to start with an empty store).
    pub fixture_path: String,
}

#[derive(Debug, Clone)]
pub struct PermissionCacheConfig {
    /// Cached permission lifetime (in seconds), 0 disables caching.
    pub duration: u64,
}

impl PermissionCacheConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application name.
    pub name: String,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Store options.
    pub store: StoreConfig,
    /// Permission cache options.
    pub permission_cache: PermissionCacheConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Config {
        Config {
            name: env_to_str("BRANCHGUARD_NAME", "branchguard"),
            logging: LoggingConfig {
                use_bunyan: env_to_bool("BRANCHGUARD_LOGGING_USE_BUNYAN", false),
            },
            store: StoreConfig {
                fixture_path: env_to_str("BRANCHGUARD_STORE_FIXTURE_PATH", ""),
            },
            permission_cache: PermissionCacheConfig {
                duration: env_to_u64("BRANCHGUARD_PERMISSION_CACHE_DURATION", 15),
            },
            version,
        }
    }

    pub fn from_env_no_version() -> Self {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_e| default.to_string())
}
