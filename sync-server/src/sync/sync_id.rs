//! Sync identifier
//!
//! The store mints a document id when a header is created; that id is the sync
//! id. Clients get it back once, in the create response, and send it in the
//! `sync-id` header on every later update.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncId(String);

impl SyncId {
    /// Wrap an id returned by the store's create call
    pub fn from_store(id: String) -> Self {
        Self(id)
    }

    /// Parse a client-supplied value; blank input is rejected
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{ "syncID": "..." }` response payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncIdPayload {
    #[serde(rename = "syncID")]
    pub sync_id: SyncId,
}

impl From<SyncId> for SyncIdPayload {
    fn from(sync_id: SyncId) -> Self {
        Self { sync_id }
    }
}
