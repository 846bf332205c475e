//! coursectl CLI - course management backend
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `seed`: insert the sample dataset into an empty database
//! - `reset`: clear all data and reseed
//! - `stats`: print row counts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, LogFormat, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "coursectl",
    author,
    version,
    about = "Students, courses, and enrollments over HTTP",
    long_about = "Backend for a university course selection system. Serves a JSON API over \
                  PostgreSQL and manages the sample dataset."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins)
    #[arg(long, global = true)]
    debug: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Insert the sample dataset if the database is empty
    Seed(commands::data::DataArgs),
    /// Delete all data, restart ids, and reseed the sample dataset
    Reset(commands::data::ResetArgs),
    /// Print row counts per table
    Stats(commands::data::StatsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&TracingConfig {
        debug: cli.debug,
        level: cli.log_level.clone(),
        format: cli.log_format,
    })
    .context("failed to initialize logging")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
        Commands::Reset(args) => commands::run_reset(args).await?,
        Commands::Stats(args) => commands::run_stats(args).await?,
    }
    Ok(())
}
