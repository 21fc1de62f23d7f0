//! Definition registry.

use std::collections::HashMap;

use lazy_static::lazy_static;
use thiserror::Error;

use super::{Branch, Definition, DefinitionError, TYPE_BRANCH};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Rule type '{0}' is already registered")]
    DuplicateType(String),

    #[error("Unknown rule type '{0}'")]
    UnknownType(String),

    #[error("Invalid '{rule_type}' definition: {source}")]
    InvalidDefinition {
        rule_type: String,
        source: DefinitionError,
    },
}

/// Builds an empty definition.
pub type DefinitionFactory = fn() -> Box<dyn Definition>;

lazy_static! {
    static ref DEFAULT_MANAGER: DefinitionManager = DefinitionManager::with_builtin_types();
}

/// Definition manager with every built-in rule type.
pub fn default_manager() -> &'static DefinitionManager {
    &DEFAULT_MANAGER
}

/// Maps rule type tags to definition factories.
#[derive(Debug, Default)]
pub struct DefinitionManager {
    factories: HashMap<String, DefinitionFactory>,
}

impl DefinitionManager {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_builtin_types() -> Self {
        let mut factories: HashMap<String, DefinitionFactory> = HashMap::new();
        factories.insert(TYPE_BRANCH.into(), Branch::new_definition);

        Self { factories }
    }

    pub fn register(
        &mut self,
        rule_type: &str,
        factory: DefinitionFactory,
    ) -> Result<(), RegistryError> {
        if self.factories.contains_key(rule_type) {
            return Err(RegistryError::DuplicateType(rule_type.into()));
        }

        self.factories.insert(rule_type.into(), factory);
        Ok(())
    }

    pub fn new_definition(&self, rule_type: &str) -> Result<Box<dyn Definition>, RegistryError> {
        self.factories
            .get(rule_type)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::UnknownType(rule_type.into()))
    }

    /// Build, parse and sanitize a definition.
    pub fn from_raw(
        &self,
        rule_type: &str,
        raw: &[u8],
    ) -> Result<Box<dyn Definition>, RegistryError> {
        let mut definition = self.new_definition(rule_type)?;
        let invalid = |source| RegistryError::InvalidDefinition {
            rule_type: rule_type.into(),
            source,
        };

        definition.parse(raw).map_err(invalid)?;
        definition.sanitize().map_err(invalid)?;

        Ok(definition)
    }

    /// Registered rule types, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<_> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}
