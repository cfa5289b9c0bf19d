//! Order header + line item synchronization
//!
//! Line items are never diffed. On every update that carries a non-empty item
//! list, the whole `AdisyonIcerik` subset for the order is deleted in one atomic
//! batch and the submitted items are inserted fresh.
//!
//! # Consistency window
//!
//! ```text
//! header merge ──► batch delete (atomic) ──► insert × N (concurrent, independent)
//!                  └──────────── journal entry open ────────────┘
//! ```
//!
//! A failure during the insert phase leaves the header updated and the detail
//! set short. The journal entry stays open so [`super::DetailReconciler`] can
//! report the order. Concurrent replacements of the same order are not
//! serialized and may leave a mix of both submissions.

use std::sync::Arc;

use futures::future::join_all;
use shared::Record;
use shared::record::with_field;

use super::{
    Collection, DetailJournal, DetailWriteKind, HeaderWriter, ORDER_FK, SyncError, SyncId,
    SyncResult,
};
use crate::store::{DocumentStore, Filter};

#[derive(Clone)]
pub struct OrderSync {
    store: Arc<dyn DocumentStore>,
    headers: HeaderWriter,
    journal: DetailJournal,
}

impl OrderSync {
    pub fn new(store: Arc<dyn DocumentStore>, headers: HeaderWriter, journal: DetailJournal) -> Self {
        Self {
            store,
            headers,
            journal,
        }
    }

    /// Create an order header and its line items
    ///
    /// Returns the header's sync id. Zero items is valid.
    pub async fn create_order_with_items(
        &self,
        header: Record,
        items: Vec<Record>,
    ) -> SyncResult<SyncId> {
        let sync_id = self.headers.create(Collection::Orders, header).await?;
        if items.is_empty() {
            return Ok(sync_id);
        }

        let entry = self
            .journal
            .open(&sync_id, DetailWriteKind::Create, items.len())
            .await?;
        self.insert_items(&sync_id, items).await?;
        self.journal.close(&entry).await;

        Ok(sync_id)
    }

    /// Merge `patch` into an existing order header and, when `items` is a
    /// non-empty list, replace its entire line item set
    ///
    /// An absent or empty `items` leaves stored line items untouched. An unknown
    /// sync id yields [`SyncError::NotFound`] before anything is written.
    pub async fn replace_order_with_items(
        &self,
        sync_id: &SyncId,
        patch: Record,
        items: Option<Vec<Record>>,
    ) -> SyncResult<()> {
        self.headers.update(Collection::Orders, sync_id, patch).await?;

        let items = match items {
            Some(items) if !items.is_empty() => items,
            _ => {
                tracing::debug!(sync_id = %sync_id, "No items submitted, detail set unchanged");
                return Ok(());
            }
        };

        let entry = self
            .journal
            .open(sync_id, DetailWriteKind::Replace, items.len())
            .await?;

        let existing = self
            .store
            .query(
                Collection::OrderItems.as_str(),
                Filter::eq(ORDER_FK, sync_id.as_str()),
            )
            .await?;
        if !existing.is_empty() {
            let ids: Vec<String> = existing.into_iter().map(|doc| doc.id).collect();
            self.store
                .batch_delete(Collection::OrderItems.as_str(), &ids)
                .await?;
            tracing::debug!(sync_id = %sync_id, removed = ids.len(), "Old order items removed");
        }

        self.insert_items(sync_id, items).await?;
        self.journal.close(&entry).await;

        Ok(())
    }

    /// Tag each item with the order foreign key and insert all of them
    /// concurrently, waiting for every insert before reporting
    async fn insert_items(&self, sync_id: &SyncId, items: Vec<Record>) -> SyncResult<()> {
        let total = items.len();
        let inserts = items.into_iter().map(|item| {
            let item = with_field(item, ORDER_FK, sync_id.as_str());
            self.store.create(Collection::OrderItems.as_str(), item)
        });
        let results = join_all(inserts).await;

        let mut failed = 0;
        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                failed += 1;
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            None => {
                tracing::info!(sync_id = %sync_id, items = total, "Order items written");
                Ok(())
            }
            Some(source) => {
                tracing::error!(
                    sync_id = %sync_id,
                    failed,
                    total,
                    error = %source,
                    "Order item inserts failed, detail set incomplete"
                );
                Err(SyncError::PartialDetailWrite {
                    sync_id: sync_id.clone(),
                    failed,
                    total,
                    source,
                })
            }
        }
    }
}
