//! Detail-write journal
//!
//! Line item writes are not atomic with their header, nor with each other. A
//! journal entry is opened before a detail write starts and deleted once every
//! insert has landed, so an entry that outlives its request marks an order whose
//! detail set may be short. [`super::DetailReconciler`] reports those.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::Record;
use shared::util::now_millis;

use super::{Collection, SyncError, SyncId, SyncResult};
use crate::store::{Document, DocumentStore, Filter, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailWriteKind {
    /// Items written alongside a new order header
    Create,
    /// Old items deleted, new items written
    Replace,
}

/// Stored shape of a journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryFields {
    #[serde(rename = "adisyonfbid")]
    sync_id: SyncId,
    operation: DetailWriteKind,
    expected_items: usize,
    started_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub sync_id: SyncId,
    pub kind: DetailWriteKind,
    pub expected_items: usize,
    /// Unix millis
    pub started_at: i64,
}

impl TryFrom<Document> for JournalEntry {
    type Error = StoreError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let fields: EntryFields = serde_json::from_value(serde_json::Value::Object(doc.fields))
            .map_err(|e| StoreError::InvalidDocument(format!("Journal entry {}: {}", doc.id, e)))?;
        Ok(Self {
            id: doc.id,
            sync_id: fields.sync_id,
            kind: fields.operation,
            expected_items: fields.expected_items,
            started_at: fields.started_at,
        })
    }
}

fn entry_record(fields: &EntryFields) -> Result<Record, StoreError> {
    match serde_json::to_value(fields) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::InvalidDocument(format!(
            "Journal entry encoded as non-object: {}",
            other
        ))),
        Err(e) => Err(StoreError::InvalidDocument(format!("Journal entry: {}", e))),
    }
}

#[derive(Clone)]
pub struct DetailJournal {
    store: Arc<dyn DocumentStore>,
}

impl DetailJournal {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Record that a detail write for `sync_id` is starting
    pub async fn open(
        &self,
        sync_id: &SyncId,
        kind: DetailWriteKind,
        expected_items: usize,
    ) -> SyncResult<JournalEntry> {
        let fields = EntryFields {
            sync_id: sync_id.clone(),
            operation: kind,
            expected_items,
            started_at: now_millis(),
        };
        let record = entry_record(&fields)?;
        let id = self
            .store
            .create(Collection::DetailJournal.as_str(), record)
            .await?;
        Ok(JournalEntry {
            id,
            sync_id: fields.sync_id,
            kind,
            expected_items,
            started_at: fields.started_at,
        })
    }

    /// Mark a detail write finished
    ///
    /// The detail data is already complete at this point, so a failure here is
    /// only logged; the reconciler closes the entry later.
    pub async fn close(&self, entry: &JournalEntry) {
        if let Err(e) = self.resolve(&entry.id).await {
            tracing::warn!(
                sync_id = %entry.sync_id,
                entry = %entry.id,
                error = %e,
                "Failed to close detail journal entry"
            );
        }
    }

    /// Delete an entry by id
    pub async fn resolve(&self, entry_id: &str) -> SyncResult<bool> {
        Ok(self
            .store
            .delete(Collection::DetailJournal.as_str(), entry_id)
            .await?)
    }

    /// Every open entry
    pub async fn pending(&self) -> SyncResult<Vec<JournalEntry>> {
        let docs = self
            .store
            .query(Collection::DetailJournal.as_str(), Filter::All)
            .await?;
        docs.into_iter()
            .map(|doc| JournalEntry::try_from(doc).map_err(SyncError::from))
            .collect()
    }
}
