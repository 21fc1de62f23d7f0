//! Repository path.

use std::str::FromStr;

use thiserror::Error;

use crate::SpacePath;

/// Type error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum RepositoryPathError {
    /// Invalid repository path.
    #[error("Invalid repository path: {}", path)]
    InvalidRepositoryPath { path: String },
}

/// Repository path: a parent space followed by the repository name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryPath {
    space: SpacePath,
    name: String,
}

impl RepositoryPath {
    /// Creates a new repository path.
    pub fn new(path: &str) -> Result<Self, RepositoryPathError> {
        let invalid = || RepositoryPathError::InvalidRepositoryPath { path: path.into() };
        let (space, name) = path.rsplit_once('/').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            space: SpacePath::new(space).map_err(|_| invalid())?,
            name: name.into(),
        })
    }

    /// Get parent space.
    pub fn space(&self) -> &SpacePath {
        &self.space
    }

    /// Get name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.space, self.name)
    }
}

impl FromStr for RepositoryPath {
    type Err = RepositoryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for RepositoryPath {
    type Error = RepositoryPathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for RepositoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split() {
        let path = RepositoryPath::new("acme/platform/api").unwrap();
        assert_eq!(path.space().full_name(), "acme/platform");
        assert_eq!(path.name(), "api");
        assert_eq!(path.to_string(), "acme/platform/api");
    }

    #[test]
    fn invalid() {
        assert!(RepositoryPath::new("api").is_err());
        assert!(RepositoryPath::new("acme/").is_err());
        assert!(RepositoryPath::new("/api").is_err());
    }
}
