use std::{io::Write, sync::Arc};

use branchguard_config::Config;
use branchguard_core::{permissions::PermissionCache, CoreModule};
use branchguard_store_memory::MemoryStore;
use clap::Parser;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub store_service: MemoryStore,
    pub permission_cache: PermissionCache,
}

impl CommandContextTest {
    pub fn new() -> Self {
        let config = Config::from_env_no_version();
        let permission_cache = PermissionCache::new(config.permission_cache.duration());

        Self {
            config,
            core_module: CoreModule::builder().build(),
            store_service: MemoryStore::new(),
            permission_cache,
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            store_service: Box::new(self.store_service),
            permission_cache: self.permission_cache,
            cancel: CancellationToken::new(),
            writer,
        }
    }

    pub fn into_captured_context(self) -> (CommandContext, Arc<RwLock<Vec<u8>>>) {
        let buf = Arc::new(RwLock::new(Vec::new()));
        (self.into_context(buf.clone()), buf)
    }
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (ctx, buf) = ctx.into_captured_context();

    {
        let command_args = {
            let mut tmp_args = vec!["bot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx).await.unwrap(),
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}
