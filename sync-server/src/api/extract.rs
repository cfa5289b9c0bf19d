//! Request helpers
//!
//! Bodies are taken as raw bytes and parsed here so malformed JSON becomes a
//! 400 envelope instead of axum's plaintext rejection.

use axum::body::Bytes;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use shared::{AppError, AppResult, Record};

use crate::sync::SyncId;

/// Parse a JSON body
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))
}

/// Non-blank header value, or 400 naming the header
pub fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> AppResult<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::bad_request(format!("{name} header is required")))
}

/// The `sync-id` header
pub fn sync_id_header(headers: &HeaderMap) -> AppResult<SyncId> {
    let raw = required_header(headers, "sync-id")?;
    SyncId::parse(raw).ok_or_else(|| AppError::bad_request("sync-id header is required"))
}

/// Entity body: either `{ "<wrapper>": { ... } }` or the bare record
pub fn unwrap_entity(mut body: Record, wrapper: &str) -> Record {
    let wrapped = body.len() == 1 && matches!(body.get(wrapper), Some(serde_json::Value::Object(_)));
    if wrapped && let Some(serde_json::Value::Object(inner)) = body.remove(wrapper) {
        return inner;
    }
    body
}
