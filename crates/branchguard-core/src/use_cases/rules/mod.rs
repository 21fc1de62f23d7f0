pub(crate) mod validate_rule;
pub(crate) mod verify_pull_request_merge;

pub use validate_rule::ValidateRuleInterface;
pub use verify_pull_request_merge::VerifyPullRequestMergeInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    validate_rule::MockValidateRuleInterface,
    verify_pull_request_merge::MockVerifyPullRequestMergeInterface,
};
