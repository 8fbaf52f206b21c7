//! Database layer - connection manager and article stores
//!
//! - One lazily established connection per process, shared by all requests
//! - Stores are read-only; every query is bounded by the operation timeout

pub mod connection;
pub mod memory;
pub mod mongo;
pub mod store;

pub use connection::{ConnectionManager, Connector, MongoConnector};
pub use memory::MemoryArticleStore;
pub use mongo::MongoArticleStore;
pub use store::{ArticleStore, SampleArticle, StoreDiagnostics, StoreError};
