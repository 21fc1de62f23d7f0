//! Protection engine.

mod branch;
mod bypass;
mod definition;
mod manager;
mod pattern;
mod set;
mod sort;
mod verify;

pub use branch::{Branch, DefApprovals, DefComments, DefMerge, DefPullReq, TYPE_BRANCH};
#[cfg(any(test, feature = "testkit"))]
pub use bypass::MockBypassResolver;
pub use bypass::{Bypass, BypassResolver};
pub use definition::{Definition, DefinitionError};
pub use manager::{default_manager, DefinitionFactory, DefinitionManager, RegistryError};
pub use pattern::{CompiledPattern, Pattern, PatternError};
pub use set::RuleSet;
pub use sort::intersect_sorted;
pub use verify::{MergeCheck, MergeVerifyInput, MergeVerifyOutput};
