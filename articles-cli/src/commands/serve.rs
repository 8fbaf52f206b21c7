//! HTTP server command
//!
//! Development: connect first and refuse to start if the database is
//! unreachable. Production: bind immediately and connect on first request.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use articles_server::{run_server, AppState, MongoArticleStore};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 0.0.0.0)
    #[arg(long, env = "ARTICLES_HOST")]
    pub host: Option<IpAddr>,

    /// Port to listen on (default: 5000)
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args
        .database
        .load(&[
            ("ARTICLES_HOST", args.host.map(|h| h.to_string())),
            ("PORT", args.port.map(|p| p.to_string())),
        ])
        .context("Invalid configuration")?;

    tracing::info!(
        uri = %config.masked_uri(),
        database = %config.database_name,
        environment = %config.environment,
        "Starting articles API on {}",
        config.bind_addr
    );

    let store = Arc::new(MongoArticleStore::new(&config));

    if config.environment.is_production() {
        tracing::info!("Production mode: database connection deferred to first request");
    } else {
        store
            .connect()
            .await
            .context("Failed to connect to MongoDB")?;
    }

    let state = AppState::new(store, config.environment).with_uri(&config.mongodb_uri);

    // Run server (blocks until shutdown)
    run_server(state, config.bind_addr)
        .await
        .context("Server error")?;

    Ok(())
}
