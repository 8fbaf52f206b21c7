//! articles-core: domain types for the read-only articles API
//!
//! - `model`: the `Article` record, identifier-or-title references, list filters
//! - `pagination`: page/limit parsing and skip arithmetic
//! - `config`: environment-driven runtime configuration
//! - `error`: structured errors shared by the server and CLI

pub mod config;
pub mod error;
pub mod model;
pub mod pagination;

pub use config::{mask_uri, AppConfig, Environment};
pub use error::{ArticleError, ConfigError};
pub use model::{Article, ArticleFilter, ArticleRef};
pub use pagination::{Pagination, PaginationParams};

/// Identifier type used by the store
pub use bson::oid::ObjectId;
