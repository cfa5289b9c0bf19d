//! Item inserts that fail after the detail write started: the request reports
//! 500, the header change stays, and the journal entry stays open until the
//! reconciler looks at it.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FailingStore, TestApp};
use http::{Method, StatusCode};
use serde_json::json;
use sync_server::store::DocumentStore;
use sync_server::{SurrealStore, sync::DetailReconciler};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_failed_item_insert_is_500_with_header_persisted() {
    let inner: Arc<dyn DocumentStore> = Arc::new(SurrealStore::open_in_memory().await.unwrap());
    let store: Arc<dyn DocumentStore> = Arc::new(FailingStore::new(inner, "AdisyonIcerik", 1));
    let app = TestApp::with_store(store);

    let (status, body) = app
        .call(
            Method::POST,
            "/tbladisyonlar",
            &[],
            Some(json!({
                "adisyonlar": { "masa": 2 },
                "adisyonicerik": [{ "urun": "kahve" }, { "urun": "cay" }, { "urun": "su" }]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("injected write failure"));
    assert!(body["message"].as_str().unwrap().contains("2 of 3"));

    // header and the one successful item are already persisted
    assert_eq!(app.count("Adisyonlar").await, 1);
    assert_eq!(app.count("AdisyonIcerik").await, 1);

    let pending = app.state.journal.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].expected_items, 3);

    let (_, health) = app.call(Method::GET, "/health", &[], None).await;
    assert_eq!(health["data"]["openDetailWrites"], 1);

    // short detail set: the reconciler reports it and leaves the entry open
    let reconciler = DetailReconciler::new(
        app.store().clone(),
        app.state.journal.clone(),
        Duration::from_secs(60),
        Duration::ZERO,
        CancellationToken::new(),
    );
    let report = reconciler.reconcile_once().await.unwrap();
    assert_eq!(report.incomplete, 1);
    assert_eq!(app.state.journal.pending().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_replacement_keeps_header_update() {
    let inner: Arc<dyn DocumentStore> = Arc::new(SurrealStore::open_in_memory().await.unwrap());
    // the create below uses the single allowed item insert
    let store: Arc<dyn DocumentStore> = Arc::new(FailingStore::new(inner, "AdisyonIcerik", 1));
    let app = TestApp::with_store(store);

    let (status, body) = app
        .call(
            Method::POST,
            "/tbladisyonlar",
            &[],
            Some(json!({
                "adisyonlar": { "masa": 2, "durum": "acik" },
                "adisyonicerik": [{ "urun": "kahve" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["syncID"].as_str().unwrap().to_string();

    let (status, _) = app
        .call(
            Method::POST,
            "/uptbladisyonlar",
            &[("sync-id", id.as_str())],
            Some(json!({
                "adisyonlar": { "durum": "kapali" },
                "adisyonicerik": [{ "urun": "cay" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let header = app.store().get("Adisyonlar", &id).await.unwrap().unwrap();
    assert_eq!(header.fields["durum"], "kapali");
    // old items were deleted before the insert failed
    assert!(app.records("AdisyonIcerik", "adisyonfbid", &id).await.is_empty());
    assert_eq!(app.state.journal.pending().await.unwrap().len(), 1);
}
