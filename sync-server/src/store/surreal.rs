//! SurrealDB Document Store
//!
//! Embedded SurrealDB behind [`DocumentStore`]. Each collection is a SurrealDB
//! table; each document is one record whose key is minted here on create.
//!
//! SurrealDB normalizes the values it stores (null becomes NONE, objects are
//! re-sorted, integers are signed 64-bit), so client records are kept as an
//! encoded JSON `body` and round-trip exactly. Top-level string fields are
//! copied into `idx` for [`Filter::Eq`]. `rev` counts writes and guards the
//! read-merge-write in [`DocumentStore::update`].
//!
//! The `id` field is reserved for the record id. Client fields named `id` are
//! dropped on write, and reads surface the record key as `id`.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use shared::Record;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::{RecordId, Surreal};

use super::{Document, DocumentStore, Filter, StoreError, StoreResult, new_document_id};

/// Projection that replaces the record id with its bare key
const SELECT_WITH_KEY: &str = "SELECT meta::id(id) AS id, body, rev";

/// Attempts before a contended update gives up
const MAX_UPDATE_ATTEMPTS: usize = 8;

#[derive(Debug, Deserialize)]
struct StoredRow {
    id: String,
    body: String,
    rev: i64,
}

#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Db>,
}

impl SurrealStore {
    /// Open (or create) an on-disk RocksDB-backed store
    pub async fn open(path: &Path, namespace: &str, database: &str) -> StoreResult<Self> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path).await?;
        db.use_ns(namespace).use_db(database).await?;
        tracing::info!(path = %path.display(), namespace, database, "SurrealDB store opened");
        Ok(Self { db })
    }

    /// Open an in-memory store (development and tests)
    pub async fn open_in_memory() -> StoreResult<Self> {
        let db: Surreal<Db> = Surreal::new::<Mem>(()).await?;
        db.use_ns("pos").use_db("sync").await?;
        Ok(Self { db })
    }

    async fn fetch(&self, thing: &RecordId) -> StoreResult<Option<StoredRow>> {
        let rows: Vec<StoredRow> = self
            .db
            .query(format!("{SELECT_WITH_KEY} FROM $thing"))
            .bind(("thing", thing.clone()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl DocumentStore for SurrealStore {
    async fn create(&self, collection: &str, record: Record) -> StoreResult<String> {
        let id = new_document_id();
        let thing = RecordId::from_table_key(collection, id.clone());
        let record = strip_reserved(collection, record);
        self.db
            .query("CREATE $thing SET body = $body, idx = $idx, rev = 0 RETURN NONE")
            .bind(("thing", thing))
            .bind(("body", encode(&record)?))
            .bind(("idx", index_fields(&record)))
            .await?
            .check()?;
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let thing = RecordId::from_table_key(collection, id.to_string());
        self.fetch(&thing).await?.map(into_document).transpose()
    }

    async fn update(&self, collection: &str, id: &str, patch: Record) -> StoreResult<bool> {
        let thing = RecordId::from_table_key(collection, id.to_string());
        let patch = strip_reserved(collection, patch);

        for _ in 0..MAX_UPDATE_ATTEMPTS {
            let Some(current) = self.fetch(&thing).await? else {
                return Ok(false);
            };
            // Top-level merge: a field in the patch replaces the stored value whole
            let mut fields = decode(&current.id, &current.body)?;
            fields.extend(patch.clone());

            let written: Vec<i64> = self
                .db
                .query(
                    "UPDATE $thing SET body = $body, idx = $idx, rev += 1 \
                     WHERE rev = $rev RETURN VALUE rev",
                )
                .bind(("thing", thing.clone()))
                .bind(("body", encode(&fields)?))
                .bind(("idx", index_fields(&fields)))
                .bind(("rev", current.rev))
                .await?
                .take(0)?;
            if !written.is_empty() {
                return Ok(true);
            }
            tracing::debug!(collection, id, "Concurrent write detected, retrying update");
        }

        Err(StoreError::Database(format!(
            "Update of {}:{} kept conflicting with concurrent writes",
            collection, id
        )))
    }

    async fn query(&self, collection: &str, filter: Filter) -> StoreResult<Vec<Document>> {
        let rows: Vec<StoredRow> = match filter {
            Filter::All => self
                .db
                .query(format!("{SELECT_WITH_KEY} FROM type::table($table)"))
                .bind(("table", collection.to_string()))
                .await?
                .take(0)?,
            Filter::Eq { field, value } => {
                // Field names are interpolated, so only plain identifiers are accepted
                if !is_identifier(&field) {
                    return Err(StoreError::InvalidDocument(format!(
                        "Invalid filter field: {}",
                        field
                    )));
                }
                self.db
                    .query(format!(
                        "{SELECT_WITH_KEY} FROM type::table($table) WHERE idx.{field} = $value"
                    ))
                    .bind(("table", collection.to_string()))
                    .bind(("value", value))
                    .await?
                    .take(0)?
            }
        };
        rows.into_iter().map(into_document).collect()
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let thing = RecordId::from_table_key(collection, id.to_string());
        if self.fetch(&thing).await?.is_none() {
            return Ok(false);
        }
        self.db
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?
            .check()?;
        Ok(true)
    }

    async fn batch_delete(&self, collection: &str, ids: &[String]) -> StoreResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let things: Vec<RecordId> = ids
            .iter()
            .map(|id| RecordId::from_table_key(collection, id.clone()))
            .collect();
        // One statement runs in one transaction: either every record goes or none does
        self.db
            .query("DELETE type::table($table) WHERE id IN $things")
            .bind(("table", collection.to_string()))
            .bind(("things", things))
            .await?
            .check()?;
        Ok(())
    }
}

fn strip_reserved(collection: &str, mut record: Record) -> Record {
    if record.remove("id").is_some() {
        tracing::warn!(collection, "Dropped reserved field 'id' from document");
    }
    record
}

fn encode(record: &Record) -> StoreResult<String> {
    serde_json::to_string(record)
        .map_err(|e| StoreError::InvalidDocument(format!("Unencodable record: {}", e)))
}

fn decode(id: &str, body: &str) -> StoreResult<Record> {
    serde_json::from_str(body)
        .map_err(|e| StoreError::InvalidDocument(format!("Document {}: {}", id, e)))
}

/// Top-level string fields, the only ones [`Filter::Eq`] can match
fn index_fields(record: &Record) -> Value {
    let index: Map<String, Value> = record
        .iter()
        .filter(|(_, value)| value.is_string())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(index)
}

fn into_document(row: StoredRow) -> StoreResult<Document> {
    let fields = decode(&row.id, &row.body)?;
    Ok(Document { id: row.id, fields })
}

fn is_identifier(field: &str) -> bool {
    let mut chars = field.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
