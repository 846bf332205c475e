//! HTTP server command
//!
//! Connects the pool, creates the schema, seeds sample data when the store
//! is empty, then serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use coursectl_server::db::{create_pool_with_options, schema, CourseStore, MemoryStore, PgStore};
use coursectl_server::domain;
use coursectl_server::http::{run_server, CorsConfig, ServerConfig};
use coursectl_server::resolve_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SERVER_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Database URL (falls back to DB_HOST/DB_PORT/DB_USER/DB_PASSWORD/DB_NAME/DB_SSLMODE)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 25)]
    pub max_connections: u32,

    /// Keep everything in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Deployment environment; "production" enables HSTS
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub app_env: String,

    /// Origins allowed by CORS (comma-separated)
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Allow credentialed CORS requests
    #[arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value_t = true, action = ArgAction::Set)]
    pub cors_allow_credentials: bool,

    /// CORS preflight cache lifetime in seconds
    #[arg(long, env = "CORS_MAX_AGE", default_value_t = 43200)]
    pub cors_max_age: u64,

    /// Add security headers to every response
    #[arg(long, env = "SECURITY_HEADERS_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub security_headers: bool,

    /// Mount /debug/stats and /debug/reset-data
    #[arg(long, env = "DEBUG_ROUTES_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub debug_routes: bool,

    /// Seed sample data on startup when the store is empty
    #[arg(long, env = "SAMPLE_DATA_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub sample_data: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        let origins = self
            .cors_allowed_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        ServerConfig {
            bind_addr: self.bind,
            cors: CorsConfig {
                allowed_origins: origins,
                allow_credentials: self.cors_allow_credentials,
                max_age: Duration::from_secs(self.cors_max_age),
            },
            security_headers: self.security_headers,
            production: self.app_env.eq_ignore_ascii_case("production"),
            debug_routes: self.debug_routes,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    let store: Arc<dyn CourseStore> = if args.in_memory {
        tracing::warn!("using in-memory store, data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = resolve_database_url(args.database_url.as_deref());
        let pool = create_pool_with_options(&database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;

        schema::migrate(&pool)
            .await
            .context("Failed to create database schema")?;

        Arc::new(PgStore::new(pool))
    };

    if args.sample_data {
        // The server still starts without sample data
        if let Err(e) = domain::initialize_sample_data(store.as_ref()).await {
            tracing::error!(error = %e, "failed to initialize sample data");
        }
    }

    tracing::info!(env = %args.app_env, "Starting coursectl server on {}", args.bind);

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    fn parse(argv: &[&str]) -> ServeArgs {
        let mut full = vec!["serve"];
        full.extend_from_slice(argv);
        Wrapper::parse_from(full).args
    }

    #[test]
    fn flags_map_onto_server_config() {
        let args = parse(&[
            "--bind",
            "127.0.0.1:9000",
            "--app-env",
            "production",
            "--cors-allowed-origins",
            "https://a.example, https://b.example",
            "--cors-allow-credentials",
            "false",
            "--debug-routes",
            "false",
        ]);
        let config = args.server_config();

        assert_eq!(config.bind_addr.port(), 9000);
        assert!(config.production);
        assert!(!config.debug_routes);
        assert!(!config.cors.allow_credentials);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }
}
