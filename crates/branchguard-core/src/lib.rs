//! Protection core module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod permissions;
pub mod protection;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, Result};
use shaku::module;
use use_cases::{
    permissions::check_space_permission::CheckSpacePermission,
    rules::{validate_rule::ValidateRule, verify_pull_request_merge::VerifyPullRequestMerge},
};

module! {
    pub CoreModule {
        components = [
            CheckSpacePermission, ValidateRule, VerifyPullRequestMerge
        ],
        providers = []
    }
}
