//! Rule commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod list;
mod validate;

use self::{list::RuleListCommand, validate::RuleValidateCommand};

/// Manage protection rules
#[derive(Parser)]
pub(crate) struct RulesCommand {
    #[clap(subcommand)]
    inner: RulesSubCommand,
}

#[async_trait]
impl Command for RulesCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum RulesSubCommand {
    List(RuleListCommand),
    Validate(RuleValidateCommand),
}

#[async_trait]
impl Command for RulesSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::List(sub) => sub.execute(ctx).await,
            Self::Validate(sub) => sub.execute(ctx).await,
        }
    }
}
