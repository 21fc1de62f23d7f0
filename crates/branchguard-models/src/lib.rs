//! Domain models.

#![warn(clippy::all)]

mod membership;
mod merge_method;
mod principal;
mod pull_request;
pub mod raw_json;
mod repository;
mod repository_path;
mod rule;
mod space_path;
mod violation;

pub use membership::{Membership, MembershipRole, MembershipRoleError, Permission};
pub use merge_method::{MergeMethod, MergeMethodError};
pub use principal::Principal;
pub use pull_request::PullRequest;
pub use repository::Repository;
pub use repository_path::{RepositoryPath, RepositoryPathError};
pub use rule::{Rule, RuleError, RuleInfo, RuleScope, RuleState, RuleStateError};
pub use space_path::{SpacePath, SpacePathError};
pub use violation::{RuleViolations, Violation, ViolationCode, ViolationParam};
