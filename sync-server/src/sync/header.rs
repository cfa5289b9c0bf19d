//! Header Writer
//!
//! Creates and partially updates single header documents: tables, customers,
//! table payments, cancellations and order headers. Records are stored
//! verbatim; no field is validated.

use std::sync::Arc;

use shared::Record;

use super::{Collection, SyncError, SyncId, SyncResult};
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct HeaderWriter {
    store: Arc<dyn DocumentStore>,
}

impl HeaderWriter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Insert `record` as a new header and return its sync id
    pub async fn create(&self, collection: Collection, record: Record) -> SyncResult<SyncId> {
        let id = self.store.create(collection.as_str(), record).await?;
        let sync_id = SyncId::from_store(id);
        tracing::info!(collection = %collection, sync_id = %sync_id, "Header created");
        Ok(sync_id)
    }

    /// Merge `patch` into the header addressed by `sync_id`
    ///
    /// Fields absent from `patch` keep their stored values. An unknown sync id
    /// yields [`SyncError::NotFound`] and writes nothing.
    pub async fn update(
        &self,
        collection: Collection,
        sync_id: &SyncId,
        patch: Record,
    ) -> SyncResult<()> {
        let fields = patch.len();
        let updated = self
            .store
            .update(collection.as_str(), sync_id.as_str(), patch)
            .await?;
        if !updated {
            tracing::debug!(collection = %collection, sync_id = %sync_id, "Header not found");
            return Err(SyncError::NotFound(format!(
                "{} {}",
                collection.label(),
                sync_id
            )));
        }
        tracing::info!(collection = %collection, sync_id = %sync_id, fields, "Header updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SurrealStore;
    use serde_json::json;

    async fn writer() -> (HeaderWriter, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(SurrealStore::open_in_memory().await.unwrap());
        (HeaderWriter::new(store.clone()), store)
    }

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_sequential_creates_return_distinct_ids() {
        let (writer, _) = writer().await;
        let a = writer
            .create(Collection::Tables, record(json!({ "masaNo": 1 })))
            .await
            .unwrap();
        let b = writer
            .create(Collection::Tables, record(json!({ "masaNo": 1 })))
            .await
            .unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_update_is_partial_merge() {
        let (writer, store) = writer().await;
        let id = writer
            .create(
                Collection::TablePayments,
                record(json!({ "tutar": 120, "tip": "nakit" })),
            )
            .await
            .unwrap();

        writer
            .update(Collection::TablePayments, &id, record(json!({ "tip": "kart" })))
            .await
            .unwrap();

        let doc = store
            .get(Collection::TablePayments.as_str(), id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.fields["tutar"], 120);
        assert_eq!(doc.fields["tip"], "kart");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_and_writes_nothing() {
        let (writer, store) = writer().await;
        let ghost = SyncId::from_store("ghost".into());

        let err = writer
            .update(Collection::Customers, &ghost, record(json!({ "ad": "x" })))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NotFound(msg) if msg == "Customer ghost"));

        let docs = store
            .query(Collection::Customers.as_str(), crate::store::Filter::All)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }
}
