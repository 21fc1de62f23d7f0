use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleStateError {
    #[error("Unknown rule state: {}", state)]
    UnknownRuleState { state: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule '{identifier}' must be defined on exactly one of a space or a repository")]
    InvalidScope { identifier: String },

    #[error("Rule identifier must not be empty")]
    EmptyIdentifier,
}

/// Rule lifecycle state.
#[derive(Debug, Serialize, Default, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleState {
    #[default]
    Active,
    Disabled,
    Monitor,
}

impl std::fmt::Display for RuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::Monitor => "monitor",
        };

        f.write_str(value)
    }
}

impl FromStr for RuleState {
    type Err = RuleStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            "monitor" => Ok(Self::Monitor),
            other => Err(RuleStateError::UnknownRuleState {
                state: other.into(),
            }),
        }
    }
}

/// Where a rule is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope<'a> {
    Space(&'a str),
    Repository(&'a str),
}

/// Identity and scope of a rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RuleInfo {
    pub id: u64,
    pub identifier: String,
    #[serde(default)]
    pub space_path: String,
    #[serde(default)]
    pub repo_path: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub state: RuleState,
}

impl RuleInfo {
    /// Defining scope; exactly one of the space and repository paths must be set.
    pub fn scope(&self) -> Result<RuleScope<'_>, RuleError> {
        match (self.space_path.is_empty(), self.repo_path.is_empty()) {
            (false, true) => Ok(RuleScope::Space(&self.space_path)),
            (true, false) => Ok(RuleScope::Repository(&self.repo_path)),
            _ => Err(RuleError::InvalidScope {
                identifier: self.identifier.clone(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        if self.identifier.is_empty() {
            return Err(RuleError::EmptyIdentifier);
        }

        self.scope().map(|_| ())
    }
}

/// Stored rule, with its applicability pattern and type-specific definition
/// kept as raw JSON until evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    #[serde(flatten)]
    pub info: RuleInfo,
    #[serde(with = "crate::raw_json", default)]
    pub pattern: Vec<u8>,
    #[serde(with = "crate::raw_json", default)]
    pub definition: Vec<u8>,
}

impl FromStr for Rule {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}
