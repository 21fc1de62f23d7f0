pub(crate) mod check_space_permission;

pub use check_space_permission::CheckSpacePermissionInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::check_space_permission::MockCheckSpacePermissionInterface;
