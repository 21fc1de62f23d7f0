//! Tracing subscriber setup.
//!
//! Human-readable trees are written on stderr by default, so that command
//! output on stdout stays clean. Bunyan JSON lines replace them when enabled.

use std::str::FromStr;

use branchguard_config::Config;
use thiserror::Error;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer};
use tracing_tree::HierarchicalLayer;

const DEFAULT_ENV_CONFIG: &str = "info,branchguard=debug,branchguard_core=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not install the global subscriber: {source}")]
    SetGlobalDefault {
        source: tracing::dispatcher::SetGlobalDefaultError,
    },

    #[error("Could not bridge `log` records: {source}")]
    LogTracer {
        source: tracing_log::log::SetLoggerError,
    },

    #[error("Invalid log filter '{configuration}': {source}")]
    EnvFilter {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

/// Parse a filter directive, falling back to the default one.
fn env_filter(configuration: Option<String>) -> Result<EnvFilter, LoggingError> {
    let configuration = configuration.unwrap_or_else(|| DEFAULT_ENV_CONFIG.to_string());

    EnvFilter::from_str(&configuration)
        .map_err(|e| LoggingError::EnvFilter { source: e, configuration })
}

fn output_layer<S>(config: &Config) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    if config.logging.use_bunyan {
        let app_name = format!("{}-{}", config.name, config.version);

        JsonStorageLayer
            .and_then(BunyanFormattingLayer::new(app_name, std::io::stderr))
            .boxed()
    } else {
        HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true)
            .with_writer(std::io::stderr)
            .boxed()
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn configure_logging(config: &Config) -> Result<(), LoggingError> {
    LogTracer::init().map_err(|e| LoggingError::LogTracer { source: e })?;

    let subscriber = tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(env_filter(std::env::var("RUST_LOG").ok())?)
        .with(output_layer(config));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::SetGlobalDefault { source: e })
}
