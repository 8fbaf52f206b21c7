//! Article store trait - the seam between handlers and the database
//!
//! Handlers only see `Arc<dyn ArticleStore>`:
//! - `MongoArticleStore` for real deployments
//! - `MemoryArticleStore` for tests and local demos

use async_trait::async_trait;
use serde::Serialize;

use articles_core::{Article, ArticleError, ArticleFilter, ArticleRef, ObjectId, Pagination};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    Connect(String),

    #[error("query failed: {0}")]
    Query(#[from] mongodb::error::Error),

    #[error("operation timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("malformed article: {0}")]
    Malformed(#[from] ArticleError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn connect(err: impl std::fmt::Display) -> Self {
        Self::Connect(err.to_string())
    }
}

/// Read-side view of the backing collection, used by `/api/debug-db`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDiagnostics {
    pub database_name: String,
    pub collections: Vec<String>,
    pub articles_count: u64,
    pub sample_article: Option<SampleArticle>,
}

/// First stored article, summarised
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleArticle {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub formatted_title: String,
    /// Top-level field names of the stored document
    pub fields: Vec<String>,
}

/// Read operations over the articles collection.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// One page of articles, newest first.
    async fn list(&self, filter: &ArticleFilter, page: Pagination) -> Result<Vec<Article>, StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Article>, StoreError>;

    /// Case-sensitive exact match on `formattedTitle`.
    async fn find_by_formatted_title(&self, formatted_title: &str) -> Result<Option<Article>, StoreError>;

    async fn diagnostics(&self) -> Result<StoreDiagnostics, StoreError>;

    /// Identifier lookup first (when the reference has identifier shape),
    /// then formatted-title lookup with the raw text.
    async fn resolve(&self, reference: &ArticleRef) -> Result<Option<Article>, StoreError> {
        if let Some(id) = reference.id() {
            if let Some(article) = self.find_by_id(id).await? {
                return Ok(Some(article));
            }
            tracing::debug!(%id, "no article with this id, trying formatted title");
        }

        self.find_by_formatted_title(reference.title()).await
    }
}
