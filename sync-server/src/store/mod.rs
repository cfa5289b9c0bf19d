//! Document Store Module
//!
//! Single-document CRUD, filtered query and atomic multi-delete over named
//! collections. The sync core only talks to [`DocumentStore`]; the embedded
//! SurrealDB adapter in [`surreal`] is the production implementation.
//!
//! The store enforces no referential integrity between collections and offers
//! no transaction spanning more than one call, except [`DocumentStore::batch_delete`],
//! which is all-or-nothing for its delete set.

pub mod surreal;

pub use surreal::SurrealStore;

use async_trait::async_trait;
use serde_json::Value;
use shared::Record;
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A stored record together with its store-assigned id
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Record,
}

impl Document {
    /// Flatten into a single record with the id as its first field
    pub fn into_record_with_id(self) -> Record {
        let mut record = Record::with_capacity(self.fields.len() + 1);
        record.insert("id".to_string(), Value::String(self.id));
        for (key, value) in self.fields {
            if key != "id" {
                record.insert(key, value);
            }
        }
        record
    }
}

/// Query filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document in the collection
    All,
    /// Documents whose top-level string `field` equals `value`
    Eq { field: String, value: String },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Document store primitives used by the sync core
///
/// Every method is a single store round trip. Implementations must be safe to
/// call concurrently; the only ordering guarantee callers get is the store's
/// own per-document write ordering.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its freshly minted id
    async fn create(&self, collection: &str, record: Record) -> StoreResult<String>;

    /// Fetch a document by id
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Replace the top-level fields named in `patch`; `false` if the document does not exist
    async fn update(&self, collection: &str, id: &str, patch: Record) -> StoreResult<bool>;

    /// List documents matching `filter` (no pagination)
    async fn query(&self, collection: &str, filter: Filter) -> StoreResult<Vec<Document>>;

    /// Delete a document by id; `false` if it does not exist
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Delete every listed document, all-or-nothing
    async fn batch_delete(&self, collection: &str, ids: &[String]) -> StoreResult<()>;
}

/// Mint a new document id
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
