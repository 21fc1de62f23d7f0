use std::fmt::Debug;

use branchguard_models::{MembershipRole, MergeMethod};
use thiserror::Error;

use super::{Bypass, MergeCheck, MergeVerifyInput};

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Invalid definition payload: {source}")]
    InvalidPayload { source: serde_json::Error },

    #[error("Merge method '{method}' is listed more than once")]
    DuplicateMergeMethod { method: MergeMethod },

    #[error("Bypass user '{user_id}' is listed more than once")]
    DuplicateBypassUser { user_id: u64 },

    #[error("Bypass role '{role}' is listed more than once")]
    DuplicateBypassRole { role: MembershipRole },
}

/// Type-specific rule configuration, able to verify a merge by itself.
pub trait Definition: Debug + Send + Sync {
    /// Replace the configuration with the one encoded in `raw`.
    fn parse(&mut self, raw: &[u8]) -> Result<(), DefinitionError>;

    /// Validate and normalize the configuration.
    fn sanitize(&mut self) -> Result<(), DefinitionError>;

    fn bypass(&self) -> &Bypass;

    fn merge_verify(&self, input: &MergeVerifyInput) -> MergeCheck;
}
