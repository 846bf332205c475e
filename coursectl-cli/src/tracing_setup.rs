//! Tracing setup for the coursectl CLI
//!
//! Usage:
//!   coursectl --debug ...               # Debug logging to console
//!   coursectl --log-format json ...     # One JSON object per event
//!   RUST_LOG=coursectl_server=debug     # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                            # Log filter, wins over everything
//!   LOG_LEVEL                           # Fallback level (default: info)
//!   LOG_FORMAT                          # text | json (default: text)

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Console output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Force debug level unless RUST_LOG is explicitly set
    pub debug: bool,
    /// Level used when RUST_LOG is unset
    pub level: String,
    pub format: LogFormat,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the global subscriber
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug);

    let result = match config.format {
        LogFormat::Text => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|err| anyhow!(err))
}
