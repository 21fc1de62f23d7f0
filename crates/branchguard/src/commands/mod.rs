//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use branchguard_config::Config;
use branchguard_core::{permissions::PermissionCache, CoreContext, CoreModule};
use branchguard_store_interface::StoreService;
use clap::Subcommand;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use self::{rules::RulesCommand, verify::VerifyCommand};
use crate::Result;

mod rules;
mod verify;

pub(crate) struct CommandContext {
    pub config: Config,
    pub store_service: Box<dyn StoreService + Send + Sync>,
    pub permission_cache: PermissionCache,
    pub core_module: CoreModule,
    pub cancel: CancellationToken,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            store_service: self.store_service.as_ref(),
            permission_cache: &self.permission_cache,
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Verify(VerifyCommand),
    Rules(RulesCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Verify(sub) => sub.execute(ctx).await,
            Self::Rules(sub) => sub.execute(ctx).await,
        }
    }
}
