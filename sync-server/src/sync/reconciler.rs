//! Detail write reconciler
//!
//! Periodically scans [`DetailJournal`] for entries older than `stale_after`.
//! An entry whose order now holds exactly the expected item count is closed;
//! anything else is reported as incomplete and left open for an operator.
//! Nothing is rewritten: the submitted item list is not kept, so a short
//! detail set can only be fixed by the client resubmitting the order.

use std::sync::Arc;
use std::time::Duration;

use shared::util::now_millis;
use tokio_util::sync::CancellationToken;

use super::{Collection, DetailJournal, JournalEntry, ORDER_FK, SyncResult};
use crate::store::{DocumentStore, Filter};

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Entries old enough to inspect
    pub scanned: usize,
    /// Entries closed because the detail set was complete
    pub resolved: usize,
    /// Entries whose detail set is short or oversized
    pub incomplete: usize,
}

pub struct DetailReconciler {
    store: Arc<dyn DocumentStore>,
    journal: DetailJournal,
    interval: Duration,
    stale_after: Duration,
    shutdown: CancellationToken,
}

impl DetailReconciler {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        journal: DetailJournal,
        interval: Duration,
        stale_after: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            journal,
            interval,
            stale_after,
            shutdown,
        }
    }

    /// Run until the shutdown token is cancelled
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            stale_after_secs = self.stale_after.as_secs(),
            "DetailReconciler started"
        );
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("DetailReconciler shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match self.reconcile_once().await {
                        Ok(report) if report.scanned > 0 => {
                            tracing::info!(
                                scanned = report.scanned,
                                resolved = report.resolved,
                                incomplete = report.incomplete,
                                "Detail journal reconciled"
                            );
                        }
                        Ok(_) => {}
                        Err(e) => tracing::error!(error = %e, "Detail journal scan failed"),
                    }
                }
            }
        }
    }

    /// One pass over the journal
    pub async fn reconcile_once(&self) -> SyncResult<ReconcileReport> {
        let cutoff = now_millis() - self.stale_after.as_millis() as i64;
        let mut report = ReconcileReport::default();

        for entry in self.journal.pending().await? {
            if entry.started_at > cutoff {
                continue;
            }
            report.scanned += 1;
            if self.is_complete(&entry).await? {
                self.journal.resolve(&entry.id).await?;
                report.resolved += 1;
            } else {
                report.incomplete += 1;
            }
        }

        Ok(report)
    }

    async fn is_complete(&self, entry: &JournalEntry) -> SyncResult<bool> {
        let stored = self
            .store
            .query(
                Collection::OrderItems.as_str(),
                Filter::eq(ORDER_FK, entry.sync_id.as_str()),
            )
            .await?
            .len();

        if stored == entry.expected_items {
            tracing::debug!(sync_id = %entry.sync_id, items = stored, "Detail write completed late");
            return Ok(true);
        }
        tracing::warn!(
            sync_id = %entry.sync_id,
            operation = ?entry.kind,
            expected = entry.expected_items,
            stored,
            started_at = entry.started_at,
            "Order detail set incomplete, client resubmission required"
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SurrealStore;
    use crate::sync::{DetailWriteKind, SyncId};
    use serde_json::json;
    use shared::record::with_field;

    async fn setup(stale_after: Duration) -> (DetailReconciler, DetailJournal, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(SurrealStore::open_in_memory().await.unwrap());
        let journal = DetailJournal::new(store.clone());
        let reconciler = DetailReconciler::new(
            store.clone(),
            journal.clone(),
            Duration::from_secs(60),
            stale_after,
            CancellationToken::new(),
        );
        (reconciler, journal, store)
    }

    async fn insert_item(store: &Arc<dyn DocumentStore>, sync_id: &SyncId) {
        let item = json!({ "urun": "kahve" }).as_object().cloned().unwrap();
        store
            .create(
                Collection::OrderItems.as_str(),
                with_field(item, ORDER_FK, sync_id.as_str()),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_complete_entry_is_resolved() {
        let (reconciler, journal, store) = setup(Duration::ZERO).await;
        let sync_id = SyncId::from_store("A".into());
        journal.open(&sync_id, DetailWriteKind::Create, 2).await.unwrap();
        insert_item(&store, &sync_id).await;
        insert_item(&store, &sync_id).await;

        let report = reconciler.reconcile_once().await.unwrap();
        assert_eq!(
            report,
            ReconcileReport {
                scanned: 1,
                resolved: 1,
                incomplete: 0
            }
        );
        assert!(journal.pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_short_entry_stays_open() {
        let (reconciler, journal, store) = setup(Duration::ZERO).await;
        let sync_id = SyncId::from_store("B".into());
        journal.open(&sync_id, DetailWriteKind::Replace, 3).await.unwrap();
        insert_item(&store, &sync_id).await;

        let report = reconciler.reconcile_once().await.unwrap();
        assert_eq!(report.incomplete, 1);
        assert_eq!(journal.pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fresh_entries_are_skipped() {
        let (reconciler, journal, _) = setup(Duration::from_secs(3600)).await;
        let sync_id = SyncId::from_store("C".into());
        journal.open(&sync_id, DetailWriteKind::Create, 1).await.unwrap();

        let report = reconciler.reconcile_once().await.unwrap();
        assert_eq!(report, ReconcileReport::default());
        assert_eq!(journal.pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancel() {
        let store: Arc<dyn DocumentStore> = Arc::new(SurrealStore::open_in_memory().await.unwrap());
        let token = CancellationToken::new();
        let reconciler = DetailReconciler::new(
            store.clone(),
            DetailJournal::new(store),
            Duration::from_millis(10),
            Duration::ZERO,
            token.clone(),
        );
        let handle = tokio::spawn(reconciler.run());
        token.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
