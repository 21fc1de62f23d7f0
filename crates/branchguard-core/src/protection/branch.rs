//! Branch protection rules.

use branchguard_models::{MergeMethod, Violation, ViolationCode, ViolationParam};
use serde::{Deserialize, Serialize};

use super::{Bypass, Definition, DefinitionError, MergeCheck, MergeVerifyInput};

pub const TYPE_BRANCH: &str = "branch";

/// Protection of the branches a pull request merges into.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Branch {
    #[serde(default)]
    pub bypass: Bypass,
    #[serde(default)]
    pub pullreq: DefPullReq,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DefPullReq {
    #[serde(default)]
    pub approvals: DefApprovals,
    #[serde(default)]
    pub comments: DefComments,
    #[serde(default)]
    pub merge: DefMerge,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DefApprovals {
    #[serde(default)]
    pub require_minimum_count: u64,
    /// Only approvals of the latest source commit count toward the minimum.
    #[serde(default)]
    pub require_latest_commit: bool,
    #[serde(default)]
    pub require_no_change_request: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DefComments {
    #[serde(default)]
    pub require_resolve_all: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DefMerge {
    /// Empty means any method.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strategies_allowed: Vec<MergeMethod>,
    #[serde(default)]
    pub delete_branch: bool,
}

impl Branch {
    pub fn new_definition() -> Box<dyn Definition> {
        Box::<Self>::default()
    }
}

impl DefApprovals {
    fn verify(&self, input: &MergeVerifyInput, violations: &mut Vec<Violation>) {
        let pull_req = &input.pull_req;

        if self.require_latest_commit {
            if pull_req.approvals_latest_commit < self.require_minimum_count {
                violations.push(
                    Violation::new(
                        ViolationCode::ApprovalsRequireLatestCommit,
                        format!(
                            "Insufficient number of approvals of the latest commit. Have {} but need at least {}.",
                            pull_req.approvals_latest_commit, self.require_minimum_count
                        ),
                    )
                    .with_params(vec![
                        ViolationParam::Minimum(self.require_minimum_count),
                        ViolationParam::Actual(pull_req.approvals_latest_commit),
                    ]),
                );
            }
        } else if pull_req.approvals < self.require_minimum_count {
            violations.push(
                Violation::new(
                    ViolationCode::ApprovalsRequireMinimumCount,
                    format!(
                        "Insufficient number of approvals. Have {} but need at least {}.",
                        pull_req.approvals, self.require_minimum_count
                    ),
                )
                .with_params(vec![
                    ViolationParam::Minimum(self.require_minimum_count),
                    ViolationParam::Actual(pull_req.approvals),
                ]),
            );
        }

        if self.require_no_change_request && pull_req.change_requested {
            violations.push(Violation::new(
                ViolationCode::ApprovalsRequireNoChangeRequest,
                "Changes have been requested by a reviewer.",
            ));
        }
    }
}

impl DefComments {
    fn verify(&self, input: &MergeVerifyInput, violations: &mut Vec<Violation>) {
        let unresolved = input.pull_req.unresolved_comments;

        if self.require_resolve_all && unresolved > 0 {
            violations.push(
                Violation::new(
                    ViolationCode::CommentsRequireResolveAll,
                    format!("All comments must be resolved. There are {unresolved} unresolved comments."),
                )
                .with_params(vec![ViolationParam::Count(unresolved)]),
            );
        }
    }
}

impl DefMerge {
    fn sanitize(&mut self) -> Result<(), DefinitionError> {
        self.strategies_allowed.sort_unstable();
        if let Some(w) = self.strategies_allowed.windows(2).find(|w| w[0] == w[1]) {
            return Err(DefinitionError::DuplicateMergeMethod { method: w[0] });
        }

        Ok(())
    }

    fn verify(&self, input: &MergeVerifyInput, output: &mut MergeCheck) {
        output.delete_source_branch = self.delete_branch;

        if self.strategies_allowed.is_empty() {
            return;
        }

        match input.method {
            None => output.allowed_methods = Some(self.strategies_allowed.clone()),
            Some(method) if !self.strategies_allowed.contains(&method) => {
                output.violations.push(
                    Violation::new(
                        ViolationCode::MergeStrategiesAllowed,
                        format!(
                            "The requested merge strategy '{}' is not allowed. Allowed strategies are: {}.",
                            method,
                            self.strategies_allowed
                                .iter()
                                .map(|m| m.to_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    )
                    .with_params(vec![
                        ViolationParam::Method(method),
                        ViolationParam::Allowed(self.strategies_allowed.clone()),
                    ]),
                );
            }
            Some(_) => (),
        }
    }
}

impl Definition for Branch {
    fn parse(&mut self, raw: &[u8]) -> Result<(), DefinitionError> {
        if raw.is_empty() {
            *self = Self::default();
            return Ok(());
        }

        *self = serde_json::from_slice(raw).map_err(|e| DefinitionError::InvalidPayload { source: e })?;
        Ok(())
    }

    fn sanitize(&mut self) -> Result<(), DefinitionError> {
        self.bypass.sanitize()?;
        self.pullreq.merge.sanitize()
    }

    fn bypass(&self) -> &Bypass {
        &self.bypass
    }

    fn merge_verify(&self, input: &MergeVerifyInput) -> MergeCheck {
        let mut output = MergeCheck::default();

        self.pullreq.merge.verify(input, &mut output);
        self.pullreq.approvals.verify(input, &mut output.violations);
        self.pullreq.comments.verify(input, &mut output.violations);

        output
    }
}
