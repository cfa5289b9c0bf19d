//! Root and health check routes

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::{ApiResponse, AppResult};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
}

async fn welcome() -> &'static str {
    "POS sync server is running"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Detail writes not yet confirmed complete
    open_detail_writes: usize,
}

async fn health_check(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<HealthResponse>>> {
    let open_detail_writes = state.journal.pending().await?.len();
    Ok(Json(ApiResponse::success(
        "ok",
        HealthResponse {
            status: "ok",
            service: "sync-server",
            version: env!("CARGO_PKG_VERSION"),
            open_detail_writes,
        },
    )))
}
