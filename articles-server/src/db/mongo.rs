//! MongoDB-backed article store

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Collection, Database};

use articles_core::model::fields;
use articles_core::{AppConfig, Article, ArticleFilter, ObjectId, Pagination};

use super::connection::{ConnectionManager, MongoConnector};
use super::store::{ArticleStore, SampleArticle, StoreDiagnostics, StoreError};

/// Article store over a single MongoDB collection.
pub struct MongoArticleStore {
    manager: ConnectionManager<MongoConnector>,
    database_name: String,
    collection: String,
    operation_timeout: Duration,
}

impl MongoArticleStore {
    pub fn new(config: &AppConfig) -> Self {
        let connector = MongoConnector::new(
            config.mongodb_uri.clone(),
            config.database_name.clone(),
            config.connect_timeout,
        );

        Self {
            manager: ConnectionManager::new(connector),
            database_name: config.database_name.clone(),
            collection: config.collection.clone(),
            operation_timeout: config.operation_timeout,
        }
    }

    /// Establish the shared connection now instead of on first request.
    pub async fn connect(&self) -> Result<(), StoreError> {
        self.manager.acquire().await.map(|_| ())
    }

    async fn database(&self) -> Result<&Database, StoreError> {
        self.manager.acquire().await
    }

    async fn articles(&self) -> Result<Collection<Document>, StoreError> {
        Ok(self.database().await?.collection::<Document>(&self.collection))
    }

    /// Run a query under the per-operation timeout.
    async fn bounded<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        tokio::time::timeout(self.operation_timeout, query)
            .await
            .map_err(|_| StoreError::Timeout {
                seconds: self.operation_timeout.as_secs(),
            })?
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Article>, StoreError> {
        let articles = self.articles().await?;
        let found = self
            .bounded(async { Ok::<_, StoreError>(articles.find_one(filter).await?) })
            .await?;

        found.map(Article::from_document).transpose().map_err(StoreError::from)
    }
}

/// Newest first; `_id` breaks ties so pages never overlap.
fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

#[async_trait]
impl ArticleStore for MongoArticleStore {
    async fn list(&self, filter: &ArticleFilter, page: Pagination) -> Result<Vec<Article>, StoreError> {
        let articles = self.articles().await?;
        let query = filter.to_document();

        let docs: Vec<Document> = self
            .bounded(async {
                let cursor = articles
                    .find(query)
                    .sort(newest_first())
                    .skip(page.skip())
                    .limit(i64::from(page.limit()))
                    .await?;
                Ok::<_, StoreError>(cursor.try_collect::<Vec<Document>>().await?)
            })
            .await?;

        tracing::debug!(?filter, page = page.page(), limit = page.limit(), count = docs.len(), "listed articles");

        docs.into_iter()
            .map(|doc| Article::from_document(doc).map_err(StoreError::from))
            .collect()
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Article>, StoreError> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn find_by_formatted_title(&self, formatted_title: &str) -> Result<Option<Article>, StoreError> {
        self.find_one(doc! { "formattedTitle": formatted_title }).await
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, StoreError> {
        let db = self.database().await?;
        let articles = db.collection::<Document>(&self.collection);

        self.bounded(async {
            let collections = db.list_collection_names().await?;
            let articles_count = articles.count_documents(doc! {}).await?;
            let sample = if articles_count > 0 {
                articles.find_one(doc! {}).await?
            } else {
                None
            };

            Ok::<_, StoreError>(StoreDiagnostics {
                database_name: self.database_name.clone(),
                collections,
                articles_count,
                sample_article: sample.map(summarise),
            })
        })
        .await
    }
}

/// Summarise a raw document without requiring it to be a valid article.
fn summarise(doc: Document) -> SampleArticle {
    let text = |field: &str, fallback: &str| match doc.get(field) {
        Some(Bson::String(value)) => value.clone(),
        _ => fallback.to_string(),
    };

    SampleArticle {
        id: match doc.get(fields::ID) {
            Some(Bson::ObjectId(id)) => id.to_hex(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        title: text(fields::TITLE, "No title"),
        formatted_title: text(fields::FORMATTED_TITLE, "No formatted title"),
        fields: doc.keys().cloned().collect(),
    }
}
