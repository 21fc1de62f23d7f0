use branchguard_models::RuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Import/Export JSON error: {source}")]
    ExchangeJsonError { source: serde_json::Error },

    #[error("Unknown rule ID '{0}'")]
    UnknownRuleId(u64),

    #[error("Rule ID '{0}' is already used")]
    DuplicateRuleId(u64),

    #[error("Rule '{identifier}' already exists in scope '{scope}'")]
    DuplicateRule { identifier: String, scope: String },

    #[error("Invalid rule: {source}")]
    InvalidRule { source: RuleError },

    #[error("Invalid space path '{0}'")]
    InvalidSpacePath(String),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = StoreError> = core::result::Result<T, E>;
