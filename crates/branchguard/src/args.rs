use std::{fs::File, io::BufReader, sync::Arc};

use branchguard_config::Config;
use branchguard_core::{permissions::PermissionCache, CoreModule};
use branchguard_store_interface::{Exchanger, StoreService};
use branchguard_store_memory::MemoryStore;
use clap::Parser;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let store_service = MemoryStore::new();
            if !config.store.fixture_path.is_empty() {
                info!(
                    fixture_path = %config.store.fixture_path,
                    message = "Importing store fixture"
                );

                let file = File::open(&config.store.fixture_path)?;
                Exchanger::import_from_json(&store_service, BufReader::new(file)).await?;
            }

            let cancel = CancellationToken::new();
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    signal_cancel.cancel();
                }
            });

            let ctx = CommandContext {
                permission_cache: PermissionCache::new(config.permission_cache.duration()),
                config,
                core_module: CoreModule::builder().build(),
                store_service: Box::new(store_service) as Box<dyn StoreService + Send + Sync>,
                cancel,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        };

        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(sync(config, args))
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
