//! Command implementations for the articles-api CLI

use clap::Args;

use articles_core::{AppConfig, ConfigError};

pub mod doctor;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use doctor::run_doctor;
pub use serve::run_serve;

/// Database settings shared by every command. Flags override the
/// environment; anything left unset falls through to `AppConfig` defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: Option<String>,

    /// Database name (default: articles_db)
    #[arg(long = "db", env = "MONGODB_DB")]
    pub database: Option<String>,

    /// Collection holding the articles (default: articles)
    #[arg(long, env = "ARTICLES_COLLECTION")]
    pub collection: Option<String>,

    /// Run in production mode (lazy connect, no error details in responses)
    #[arg(long)]
    pub production: bool,
}

impl DatabaseArgs {
    /// Resolve the full configuration, flags first, then the environment.
    pub fn load(&self, overrides: &[(&str, Option<String>)]) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| {
            let from_flags = match key {
                "MONGODB_URI" => self.mongodb_uri.clone(),
                "MONGODB_DB" => self.database.clone(),
                "ARTICLES_COLLECTION" => self.collection.clone(),
                "APP_ENV" if self.production => Some("production".to_string()),
                _ => overrides
                    .iter()
                    .find(|(name, _)| *name == key)
                    .and_then(|(_, value)| value.clone()),
            };
            from_flags.or_else(|| std::env::var(key).ok())
        })
    }
}
