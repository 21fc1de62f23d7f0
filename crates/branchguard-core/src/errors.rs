//! Domain errors.

use branchguard_models::RuleError;
use branchguard_store_interface::StoreError;
use thiserror::Error;

use crate::protection::{DefinitionError, PatternError, RegistryError};

/// Domain error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    /// Wraps [`StoreError`].
    #[error("Store error: {source}")]
    StoreError { source: StoreError },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Registry error: {source}")]
    RegistryError { source: RegistryError },

    #[error("Definition error: {source}")]
    DefinitionError { source: DefinitionError },

    #[error("Pattern error: {source}")]
    PatternError { source: PatternError },

    #[error("Invalid rule: {source}")]
    InvalidRule { source: RuleError },
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        Self::StoreError { source: e }
    }
}

impl From<RegistryError> for DomainError {
    fn from(e: RegistryError) -> Self {
        Self::RegistryError { source: e }
    }
}

impl From<DefinitionError> for DomainError {
    fn from(e: DefinitionError) -> Self {
        Self::DefinitionError { source: e }
    }
}

impl From<PatternError> for DomainError {
    fn from(e: PatternError) -> Self {
        Self::PatternError { source: e }
    }
}

impl From<RuleError> for DomainError {
    fn from(e: RuleError) -> Self {
        Self::InvalidRule { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T, E = DomainError> = core::result::Result<T, E>;
