//! Shared helpers for router-level tests
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode};
use serde_json::Value;
use shared::Record;
use sync_server::store::{Document, DocumentStore, Filter, StoreError, StoreResult};
use sync_server::{Config, ServerState, SurrealStore};
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(SurrealStore::open_in_memory().await.unwrap());
        Self::with_store(store)
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let state = ServerState::with_store(Config::for_testing(&[API_KEY]), store);
        let router = sync_server::api::build_app(&state).with_state(state.clone());
        Self { state, router }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.state.store
    }

    /// Send a request with the test API key
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut all = vec![("x-api-key", API_KEY)];
        all.extend_from_slice(headers);
        self.call_raw(method, path, &all, body.map(|b| b.to_string()))
            .await
    }

    /// Send a request exactly as given
    pub async fn call_raw(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if body.is_some() {
            request = request.header(http::header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, json)
    }

    /// Store records of `collection` whose `field` equals `value`
    pub async fn records(&self, collection: &str, field: &str, value: &str) -> Vec<Record> {
        self.store()
            .query(collection, Filter::eq(field, value))
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.fields)
            .collect()
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.store().query(collection, Filter::All).await.unwrap().len()
    }
}

/// Delegating store that fails creates in one collection once `allow` of them
/// have gone through
pub struct FailingStore {
    inner: Arc<dyn DocumentStore>,
    collection: &'static str,
    allow: usize,
    seen: AtomicUsize,
}

impl FailingStore {
    pub fn new(inner: Arc<dyn DocumentStore>, collection: &'static str, allow: usize) -> Self {
        Self {
            inner,
            collection,
            allow,
            seen: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn create(&self, collection: &str, record: Record) -> StoreResult<String> {
        if collection == self.collection && self.seen.fetch_add(1, Ordering::SeqCst) >= self.allow {
            return Err(StoreError::Database("injected write failure".into()));
        }
        self.inner.create(collection, record).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Record) -> StoreResult<bool> {
        self.inner.update(collection, id, patch).await
    }

    async fn query(&self, collection: &str, filter: Filter) -> StoreResult<Vec<Document>> {
        self.inner.query(collection, filter).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.inner.delete(collection, id).await
    }

    async fn batch_delete(&self, collection: &str, ids: &[String]) -> StoreResult<()> {
        self.inner.batch_delete(collection, ids).await
    }
}
