use async_trait::async_trait;
use branchguard_models::{RepositoryPath, RuleScope};
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List rules applying to a repository, in application order
#[derive(Parser)]
pub(crate) struct RuleListCommand {
    /// Repository path (e.g. `acme/platform/api`)
    repository_path: RepositoryPath,
}

#[async_trait]
impl Command for RuleListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let rules = ctx
            .store_service
            .rules_list_for_repository(&self.repository_path)
            .await?;

        if rules.is_empty() {
            writeln!(
                ctx.writer.write().await,
                "No rule applies to repository {}.",
                self.repository_path
            )?;
            return Ok(());
        }

        writeln!(
            ctx.writer.write().await,
            "Rules for repository {}:",
            self.repository_path
        )?;
        for rule in rules {
            let info = &rule.info;
            let scope = match info.scope()? {
                RuleScope::Space(path) => format!("space {path}"),
                RuleScope::Repository(path) => format!("repository {path}"),
            };

            writeln!(
                ctx.writer.write().await,
                "- #{} '{}' ({}, {}) from {}",
                info.id,
                info.identifier,
                info.rule_type,
                info.state,
                scope
            )?;
        }

        Ok(())
    }
}
