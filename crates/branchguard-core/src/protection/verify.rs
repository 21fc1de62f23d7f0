use branchguard_models::{MergeMethod, Principal, PullRequest, Repository, Violation};
use serde::{Deserialize, Serialize};

/// Merge attempt evaluated against the protection rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeVerifyInput {
    pub actor: Principal,
    pub target_repo: Repository,
    pub pull_req: PullRequest,
    /// Requested merge method. Without one, the verification reports the
    /// allowed methods instead of checking a specific one.
    #[serde(default)]
    pub method: Option<MergeMethod>,
}

/// Aggregated merge decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeVerifyOutput {
    pub delete_source_branch: bool,
    /// `None` when no restriction is reported. `Some(vec![])` means that no
    /// method is allowed at all.
    pub allowed_methods: Option<Vec<MergeMethod>>,
}

/// Outcome of a single definition's merge check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeCheck {
    pub violations: Vec<Violation>,
    pub delete_source_branch: bool,
    /// Ascending subset of methods the definition allows, when it restricts them.
    pub allowed_methods: Option<Vec<MergeMethod>>,
}
