//! Sync-layer error type
//!
//! `SyncError` sits between the store (`StoreError`) and the HTTP surface
//! (`AppError`). Handlers propagate it with `?` and the `From` impl below picks
//! the envelope and status.

use shared::AppError;
use thiserror::Error;

use super::SyncId;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Required input absent (400)
    #[error("{0}")]
    BadRequest(String),

    /// Addressed record absent (404)
    #[error("{0} not found")]
    NotFound(String),

    /// A single store call failed (500)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Some line item inserts failed after the detail write started (500).
    /// Whatever was already written stays in place.
    #[error("{failed} of {total} item inserts failed for order {sync_id}: {source}")]
    PartialDetailWrite {
        sync_id: SyncId,
        failed: usize,
        total: usize,
        source: StoreError,
    },
}

pub type SyncResult<T> = Result<T, SyncError>;

impl From<SyncError> for AppError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::BadRequest(msg) => AppError::bad_request(msg),
            SyncError::NotFound(resource) => AppError::not_found(resource),
            other => AppError::store_failure(other.to_string()),
        }
    }
}
