use branchguard_models::Rule;
use shaku::{Component, Interface};

use crate::{
    protection::{default_manager, Pattern},
    Result,
};

/// Check a rule before it is stored: scope, registered type, definition and
/// pattern.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait ValidateRuleInterface: Interface {
    fn run(&self, rule: &Rule) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = ValidateRuleInterface)]
pub(crate) struct ValidateRule;

impl ValidateRuleInterface for ValidateRule {
    #[tracing::instrument(skip(self, rule), fields(identifier = %rule.info.identifier))]
    fn run(&self, rule: &Rule) -> Result<()> {
        rule.info.validate()?;
        default_manager().from_raw(&rule.info.rule_type, &rule.definition)?;
        Pattern::parse(&rule.pattern)?.validate()?;

        Ok(())
    }
}
