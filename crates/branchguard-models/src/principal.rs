use serde::{Deserialize, Serialize};

/// Principal acting on the system (user or service account).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Principal {
    pub id: u64,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub display_name: String,
}

impl Principal {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}
