use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MembershipRoleError {
    #[error("Unknown membership role: {}", role)]
    UnknownMembershipRole { role: String },
}

/// Permission checked against space memberships.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    SpaceView,
    SpaceEdit,
    RepoView,
    RepoPush,
    RepoEdit,
}

/// Role granted to a principal on a space.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MembershipRole {
    #[default]
    Reader,
    Contributor,
    Executor,
    SpaceOwner,
}

impl MembershipRole {
    /// Permissions granted by the role, ascending.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Reader | Self::Executor => &[Permission::SpaceView, Permission::RepoView],
            Self::Contributor => &[
                Permission::SpaceView,
                Permission::RepoView,
                Permission::RepoPush,
            ],
            Self::SpaceOwner => &[
                Permission::SpaceView,
                Permission::SpaceEdit,
                Permission::RepoView,
                Permission::RepoPush,
                Permission::RepoEdit,
            ],
        }
    }

    pub fn has_permission(self, permission: Permission) -> bool {
        self.permissions().binary_search(&permission).is_ok()
    }
}

impl std::fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Reader => "reader",
            Self::Contributor => "contributor",
            Self::Executor => "executor",
            Self::SpaceOwner => "space_owner",
        };

        f.write_str(value)
    }
}

impl FromStr for MembershipRole {
    type Err = MembershipRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reader" => Ok(Self::Reader),
            "contributor" => Ok(Self::Contributor),
            "executor" => Ok(Self::Executor),
            "space_owner" => Ok(Self::SpaceOwner),
            other => Err(MembershipRoleError::UnknownMembershipRole { role: other.into() }),
        }
    }
}

/// Principal membership on a space.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Membership {
    pub space_path: String,
    pub principal_id: u64,
    pub role: MembershipRole,
}
