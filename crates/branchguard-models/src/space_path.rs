//! Space path.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum SpacePathError {
    /// Invalid space path.
    #[error("Invalid space path: {}", path)]
    InvalidSpacePath { path: String },
}

/// Hierarchical space path (e.g. `acme/platform/tools`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpacePath {
    segments: Vec<String>,
}

impl SpacePath {
    pub fn new(path: &str) -> Result<Self, SpacePathError> {
        let segments: Vec<String> = path.split('/').map(Into::into).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(SpacePathError::InvalidSpacePath { path: path.into() });
        }

        Ok(Self { segments })
    }

    /// Path segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Parent space, if any.
    pub fn parent(&self) -> Option<SpacePath> {
        if self.segments.len() > 1 {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// This space followed by each of its ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = SpacePath> + '_ {
        (1..=self.segments.len()).rev().map(|len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    pub fn full_name(&self) -> String {
        self.segments.join("/")
    }
}

impl FromStr for SpacePath {
    type Err = SpacePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SpacePath {
    type Error = SpacePathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SpacePath> for String {
    fn from(value: SpacePath) -> Self {
        value.full_name()
    }
}

impl std::fmt::Display for SpacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors() {
        let path = SpacePath::new("acme/platform/tools").unwrap();
        let names: Vec<_> = path.ancestors().map(|p| p.full_name()).collect();

        assert_eq!(names, vec!["acme/platform/tools", "acme/platform", "acme"]);
        assert_eq!(path.parent().unwrap().full_name(), "acme/platform");
        assert_eq!(SpacePath::new("acme").unwrap().parent(), None);
    }

    #[test]
    fn invalid() {
        assert!(SpacePath::new("").is_err());
        assert!(SpacePath::new("acme//tools").is_err());
        assert!(SpacePath::new("acme/").is_err());
    }
}
