//! In-memory article store for tests and local demos

use async_trait::async_trait;
use tokio::sync::RwLock;

use articles_core::{Article, ArticleFilter, ObjectId, Pagination};

use super::store::{ArticleStore, SampleArticle, StoreDiagnostics, StoreError};

/// Articles held in a `Vec`, queried with the same ordering and paging
/// rules as the MongoDB store.
#[derive(Default)]
pub struct MemoryArticleStore {
    articles: RwLock<Vec<Article>>,
    /// When set, every operation fails with this message
    outage: RwLock<Option<String>>,
}

impl MemoryArticleStore {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
            outage: RwLock::new(None),
        }
    }

    pub async fn insert(&self, article: Article) {
        self.articles.write().await.push(article);
    }

    /// Make every subsequent operation fail (or recover with `None`).
    pub async fn set_outage(&self, message: Option<String>) {
        *self.outage.write().await = message;
    }

    async fn check(&self) -> Result<(), StoreError> {
        match self.outage.read().await.as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn list(&self, filter: &ArticleFilter, page: Pagination) -> Result<Vec<Article>, StoreError> {
        self.check().await?;

        let mut matching: Vec<Article> = self
            .articles
            .read()
            .await
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(skip)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Article>, StoreError> {
        self.check().await?;
        Ok(self.articles.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_formatted_title(&self, formatted_title: &str) -> Result<Option<Article>, StoreError> {
        self.check().await?;
        Ok(self
            .articles
            .read()
            .await
            .iter()
            .find(|a| a.formatted_title == formatted_title)
            .cloned())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, StoreError> {
        self.check().await?;
        let articles = self.articles.read().await;

        let sample_article = articles.first().map(|a| {
            let mut fields: Vec<String> = ["_id", "title", "formattedTitle", "category", "createdAt"]
                .into_iter()
                .map(String::from)
                .collect();
            fields.extend(a.extra.keys().cloned());

            SampleArticle {
                id: a.id.to_hex(),
                title: a.title.clone(),
                formatted_title: a.formatted_title.clone(),
                fields,
            }
        });

        Ok(StoreDiagnostics {
            database_name: "memory".to_string(),
            collections: vec!["articles".to_string()],
            articles_count: articles.len() as u64,
            sample_article,
        })
    }
}
