//! Sync core
//!
//! # 组件
//!
//! - [`SyncId`] - store-assigned identifier surfaced to clients as `syncID`
//! - [`HeaderWriter`] - create / partial update of a single header document
//! - [`OrderSync`] - order header + line items, destroy-and-recreate replacement
//! - [`CourierDirectory`] - branch-scoped courier assignment listing and deletion
//! - [`DetailJournal`] / [`DetailReconciler`] - make unfinished detail writes visible
//!
//! Nothing here takes a lock or spans a transaction across calls. Two requests
//! touching the same header interleave at store round trips.

mod collection;
mod courier;
mod detail;
mod error;
mod header;
mod journal;
mod reconciler;
mod sync_id;

pub use collection::{BRANCH_FIELD, Collection, ORDER_FK};
pub use courier::CourierDirectory;
pub use detail::OrderSync;
pub use error::{SyncError, SyncResult};
pub use header::HeaderWriter;
pub use journal::{DetailJournal, DetailWriteKind, JournalEntry};
pub use reconciler::{DetailReconciler, ReconcileReport};
pub use sync_id::{SyncId, SyncIdPayload};
