use serde::{Deserialize, Serialize};

use crate::{RepositoryPath, RepositoryPathError};

/// Repository snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    /// Full path, parent spaces included (e.g. `acme/platform/api`).
    pub path: String,
    pub default_branch: String,
}

impl Repository {
    pub fn repository_path(&self) -> Result<RepositoryPath, RepositoryPathError> {
        RepositoryPath::new(&self.path)
    }
}
