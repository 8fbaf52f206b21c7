//! articles-api - read-only HTTP API over the articles collection
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `doctor`: check the database connection and print a diagnostics report

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "articles-api",
    author,
    version,
    about = "Read-only HTTP query layer over a MongoDB articles collection"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check database connectivity and print collection diagnostics
    Doctor(commands::doctor::DoctorArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Doctor(args) => commands::run_doctor(args).await?,
    }
    Ok(())
}
