//! Lazily established, process-wide database handle
//!
//! The first `acquire()` connects; every later call reuses the handle.
//! Concurrent first callers share a single in-flight connect.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tokio::sync::OnceCell;

use super::store::StoreError;

/// Application name reported to the server
const APP_NAME: &str = "articles-api";

/// The driver keeps one socket; requests multiplex over it.
const MAX_POOL_SIZE: u32 = 1;

/// Establishes a connection handle (testable)
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Send + Sync;

    async fn connect(&self) -> Result<Self::Handle, StoreError>;
}

/// Caches the handle produced by a `Connector`.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    handle: OnceCell<C::Handle>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            handle: OnceCell::new(),
        }
    }

    /// Return the cached handle, connecting on first use.
    ///
    /// A failed connect leaves the cache empty; the next call tries again.
    pub async fn acquire(&self) -> Result<&C::Handle, StoreError> {
        self.handle
            .get_or_try_init(|| async {
                tracing::info!("establishing database connection");
                let handle = self.connector.connect().await?;
                tracing::info!("database connection established");
                Ok::<_, StoreError>(handle)
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }
}

/// MongoDB connector
pub struct MongoConnector {
    uri: String,
    database: String,
    connect_timeout: Duration,
}

impl MongoConnector {
    pub fn new(uri: impl Into<String>, database: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            connect_timeout,
        }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = Database;

    async fn connect(&self) -> Result<Database, StoreError> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(StoreError::connect)?;
        options.app_name = Some(APP_NAME.to_string());
        options.max_pool_size = Some(MAX_POOL_SIZE);
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.connect_timeout);

        let client = Client::with_options(options).map_err(StoreError::connect)?;
        let db = client.database(&self.database);

        // The driver connects lazily; ping so a bad endpoint fails here.
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(StoreError::connect)?;

        Ok(db)
    }
}
