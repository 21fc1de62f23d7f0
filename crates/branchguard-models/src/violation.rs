//! Protection violations.

use serde::{Deserialize, Serialize};

use crate::{MergeMethod, RuleInfo};

/// Violation code.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    #[serde(rename = "pullreq.merge.strategies_allowed")]
    MergeStrategiesAllowed,
    #[serde(rename = "pullreq.approvals.require_minimum_count")]
    ApprovalsRequireMinimumCount,
    #[serde(rename = "pullreq.approvals.require_no_change_request")]
    ApprovalsRequireNoChangeRequest,
    #[serde(rename = "pullreq.approvals.require_latest_commit")]
    ApprovalsRequireLatestCommit,
    #[serde(rename = "pullreq.comments.require_resolve_all")]
    CommentsRequireResolveAll,
}

impl ViolationCode {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::MergeStrategiesAllowed => "pullreq.merge.strategies_allowed",
            Self::ApprovalsRequireMinimumCount => "pullreq.approvals.require_minimum_count",
            Self::ApprovalsRequireNoChangeRequest => "pullreq.approvals.require_no_change_request",
            Self::ApprovalsRequireLatestCommit => "pullreq.approvals.require_latest_commit",
            Self::CommentsRequireResolveAll => "pullreq.comments.require_resolve_all",
        }
    }
}

impl std::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Structured value attached to a violation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationParam {
    Method(MergeMethod),
    Allowed(Vec<MergeMethod>),
    Minimum(u64),
    Actual(u64),
    Count(u64),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Violation {
    pub code: ViolationCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ViolationParam>,
}

impl Violation {
    pub fn new(code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<ViolationParam>) -> Self {
        self.params = params;
        self
    }
}

/// Violations raised by a single rule.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RuleViolations {
    pub rule: RuleInfo,
    /// The actor may bypass the rule: violations are informative only.
    pub bypassed: bool,
    pub violations: Vec<Violation>,
}

impl RuleViolations {
    pub fn is_blocking(&self) -> bool {
        !self.bypassed && !self.violations.is_empty()
    }

    /// Whether any entry blocks the operation.
    pub fn any_blocking(entries: &[RuleViolations]) -> bool {
        entries.iter().any(Self::is_blocking)
    }
}
