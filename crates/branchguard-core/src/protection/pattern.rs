//! Branch applicability patterns.

use globset::{GlobBuilder, GlobMatcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid pattern payload: {source}")]
    InvalidPayload { source: serde_json::Error },

    #[error("Empty glob in {list} patterns")]
    EmptyGlob { list: &'static str },

    #[error("Invalid glob '{glob}': {source}")]
    InvalidGlob {
        glob: String,
        source: globset::Error,
    },
}

/// Rule applicability over branch names.
///
/// A pattern without the default flag and without include globs matches every
/// branch. Exclude globs always win.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pattern {
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl Pattern {
    /// Parse a raw pattern payload. An empty payload is an empty pattern.
    pub fn parse(raw: &[u8]) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_slice(raw).map_err(|e| PatternError::InvalidPayload { source: e })
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        self.compile().map(|_| ())
    }

    pub fn compile(&self) -> Result<CompiledPattern, PatternError> {
        Ok(CompiledPattern {
            default: self.default,
            include: compile_globs(&self.include, "include")?,
            exclude: compile_globs(&self.exclude, "exclude")?,
        })
    }
}

fn compile_globs(globs: &[String], list: &'static str) -> Result<Vec<GlobMatcher>, PatternError> {
    globs
        .iter()
        .map(|glob| {
            if glob.is_empty() {
                return Err(PatternError::EmptyGlob { list });
            }

            GlobBuilder::new(glob)
                .literal_separator(true)
                .build()
                .map(|g| g.compile_matcher())
                .map_err(|e| PatternError::InvalidGlob {
                    glob: glob.clone(),
                    source: e,
                })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    default: bool,
    include: Vec<GlobMatcher>,
    exclude: Vec<GlobMatcher>,
}

impl CompiledPattern {
    pub fn matches(&self, branch_name: &str, default_branch: &str) -> bool {
        let mut matches = !self.default && self.include.is_empty();
        matches = matches || (self.default && branch_name == default_branch);
        matches = matches || self.include.iter().any(|g| g.is_match(branch_name));

        if self.exclude.iter().any(|g| g.is_match(branch_name)) {
            return false;
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(raw: &str, branch: &str) -> bool {
        Pattern::parse(raw.as_bytes())
            .unwrap()
            .compile()
            .unwrap()
            .matches(branch, "main")
    }

    #[test]
    fn empty_matches_everything() {
        assert!(matches("{}", "main"));
        assert!(matches("{}", "feature/x"));
        assert!(Pattern::parse(b"").unwrap().compile().unwrap().matches("dev", "main"));
    }

    #[test]
    fn default_branch() {
        assert!(matches(r#"{"default": true}"#, "main"));
        assert!(!matches(r#"{"default": true}"#, "develop"));
    }

    #[test]
    fn include_and_exclude() {
        let raw = r#"{"include": ["release/*", "hotfix-*"], "exclude": ["release/old*"]}"#;

        assert!(matches(raw, "release/1.0"));
        assert!(matches(raw, "hotfix-42"));
        assert!(!matches(raw, "release/old-1.0"));
        assert!(!matches(raw, "main"));
        // Separators are not crossed by a single star.
        assert!(!matches(raw, "release/1.0/rc"));
    }

    #[test]
    fn default_with_include() {
        let raw = r#"{"default": true, "include": ["develop"]}"#;

        assert!(matches(raw, "main"));
        assert!(matches(raw, "develop"));
        assert!(!matches(raw, "feature"));
    }

    #[test]
    fn exclude_wins_over_default() {
        assert!(!matches(r#"{"default": true, "exclude": ["ma*"]}"#, "main"));
        assert!(!matches(r#"{"exclude": ["*"]}"#, "main"));
    }

    #[test]
    fn invalid() {
        assert!(matches!(
            Pattern::parse(b"{\"include\": 3}"),
            Err(PatternError::InvalidPayload { .. })
        ));

        let pattern = Pattern {
            include: vec!["release/[".into()],
            ..Default::default()
        };
        assert!(matches!(
            pattern.validate(),
            Err(PatternError::InvalidGlob { .. })
        ));

        let pattern = Pattern {
            exclude: vec![String::new()],
            ..Default::default()
        };
        assert!(matches!(
            pattern.validate(),
            Err(PatternError::EmptyGlob { list: "exclude" })
        ));
    }
}
