//! Validation utilities.

use std::{fmt::Write, path::Path};

use branchguard_config::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Missing env. var.: {}", name).unwrap();
    }

    #[inline]
    fn _missing_file(error: &mut String, name: &str, path: &str) {
        error.push('\n');
        write!(error, "  - Missing file for env. var. {}: {}", name, path).unwrap();
    }

    let mut error = String::new();

    if config.name.is_empty() {
        _missing(&mut error, "BRANCHGUARD_NAME");
    }

    if !config.store.fixture_path.is_empty() && !Path::new(&config.store.fixture_path).is_file()
    {
        _missing_file(
            &mut error,
            "BRANCHGUARD_STORE_FIXTURE_PATH",
            &config.store.fixture_path,
        );
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_env_vars() {
        let mut config = Config::from_env_no_version();
        config.name = "branchguard".into();
        config.store.fixture_path = String::new();
        assert!(validate_env_vars(&config).is_ok());

        config.name = String::new();
        config.store.fixture_path = "/this/path/does/not/exist.json".into();

        let ValidationError::EnvVarsError { errors } = validate_env_vars(&config).unwrap_err();
        assert_eq!(
            errors,
            concat!(
                "\n  - Missing env. var.: BRANCHGUARD_NAME",
                "\n  - Missing file for env. var. BRANCHGUARD_STORE_FIXTURE_PATH: /this/path/does/not/exist.json"
            )
        );
    }
}
