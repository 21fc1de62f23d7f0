use std::{fs::File, io::BufReader, path::PathBuf};

use async_trait::async_trait;
use branchguard_core::use_cases::rules::ValidateRuleInterface;
use branchguard_models::Rule;
use clap::Parser;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Validate a rule JSON file
#[derive(Parser)]
pub(crate) struct RuleValidateCommand {
    /// Input file
    input_file: PathBuf,
}

#[async_trait]
impl Command for RuleValidateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let file = File::open(&self.input_file)?;
        let rule: Rule = serde_json::from_reader(BufReader::new(file))?;

        let validate_uc: &dyn ValidateRuleInterface = ctx.core_module.resolve_ref();
        validate_uc.run(&rule)?;

        writeln!(
            ctx.writer.write().await,
            "Rule '{}' is valid.",
            rule.info.identifier
        )?;

        Ok(())
    }
}
