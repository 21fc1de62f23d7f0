use serde::{Deserialize, Serialize};

/// Pull request snapshot, with the review state needed by protection rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub id: u64,
    #[serde(default)]
    pub number: u64,
    pub source_branch: String,
    pub target_branch: String,
    /// Approving reviews, any commit.
    #[serde(default)]
    pub approvals: u64,
    /// Approving reviews submitted on the latest source commit.
    #[serde(default)]
    pub approvals_latest_commit: u64,
    /// Whether at least one reviewer currently requests changes.
    #[serde(default)]
    pub change_requested: bool,
    #[serde(default)]
    pub unresolved_comments: u64,
}
