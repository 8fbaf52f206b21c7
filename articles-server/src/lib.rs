//! articles-server: read-only HTTP query layer over the articles collection
//!
//! Request flow: route handler validates its parameter, asks the injected
//! `ArticleStore` for one query, and serializes the result or error as JSON.

pub mod db;
pub mod http;

pub use db::{ArticleStore, MemoryArticleStore, MongoArticleStore, StoreError};
pub use http::{build_router, run_server, ApiError, AppState, ServerError};
