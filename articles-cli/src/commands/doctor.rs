//! Connection check: prints the same report as GET /api/debug-db

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use articles_server::{ArticleStore, MongoArticleStore};

use super::DatabaseArgs;

/// Arguments for the doctor command
#[derive(Parser, Debug)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_doctor(args: DoctorArgs) -> Result<()> {
    let config = args.database.load(&[]).context("Invalid configuration")?;
    let store = MongoArticleStore::new(&config);

    let diagnostics = store
        .diagnostics()
        .await
        .with_context(|| format!("Database check failed for {}", config.masked_uri()))?;

    let report = json!({
        "environment": config.environment.as_str(),
        "mongoUriMasked": config.masked_uri(),
        "diagnostics": diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
