use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeMethodError {
    /// Unknown merge method.
    #[error("Unknown merge method: {}", method)]
    UnknownMergeMethod { method: String },
}

/// Merge method.
///
/// Variants are declared in ascending name order, so the derived [`Ord`]
/// matches the textual ordering used when methods are sorted.
#[derive(
    Debug, Serialize, Default, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Merge
    #[default]
    Merge,
    /// Rebase
    Rebase,
    /// Squash
    Squash,
}

impl MergeMethod {
    /// Every known merge method, ascending.
    pub const ALL: [MergeMethod; 3] = [Self::Merge, Self::Rebase, Self::Squash];

    /// Every known merge method as an owned list.
    pub fn all() -> Vec<MergeMethod> {
        Self::ALL.to_vec()
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Rebase => "rebase",
            Self::Squash => "squash",
        }
    }
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for MergeMethod {
    type Err = MergeMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for MergeMethod {
    type Error = MergeMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            "squash" => Ok(Self::Squash),
            other => Err(MergeMethodError::UnknownMergeMethod {
                method: other.into(),
            }),
        }
    }
}

impl TryFrom<&String> for MergeMethod {
    type Error = MergeMethodError;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::try_from(&value[..])
    }
}
