//! Courier assignment directory
//!
//! Assignments are created by another system; this side only lists them per
//! branch and deletes them by id.

use std::sync::Arc;

use shared::Record;

use super::{BRANCH_FIELD, Collection, SyncError, SyncResult};
use crate::store::{DocumentStore, Filter};

#[derive(Clone)]
pub struct CourierDirectory {
    store: Arc<dyn DocumentStore>,
}

impl CourierDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All assignments of branch `sube_id`, each carrying its store id as `id`
    pub async fn list_assignments(&self, sube_id: &str) -> SyncResult<Vec<Record>> {
        let sube_id = sube_id.trim();
        if sube_id.is_empty() {
            return Err(SyncError::BadRequest("subeid header is required".into()));
        }

        let docs = self
            .store
            .query(
                Collection::CourierAssignments.as_str(),
                Filter::eq(BRANCH_FIELD, sube_id),
            )
            .await?;
        tracing::debug!(sube_id, count = docs.len(), "Courier assignments listed");
        Ok(docs.into_iter().map(|doc| doc.into_record_with_id()).collect())
    }

    /// Delete one assignment and echo its id back
    pub async fn delete_assignment(&self, doc_id: &str) -> SyncResult<String> {
        let doc_id = doc_id.trim();
        if doc_id.is_empty() {
            return Err(SyncError::BadRequest("docid header is required".into()));
        }

        let deleted = self
            .store
            .delete(Collection::CourierAssignments.as_str(), doc_id)
            .await?;
        if !deleted {
            return Err(SyncError::NotFound(format!(
                "{} {}",
                Collection::CourierAssignments.label(),
                doc_id
            )));
        }
        tracing::info!(doc_id, "Courier assignment deleted");
        Ok(doc_id.to_string())
    }
}
