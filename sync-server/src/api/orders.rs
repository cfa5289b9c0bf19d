//! Order sync routes
//!
//! | 路径 | 方法 | Header | 说明 |
//! |------|------|--------|------|
//! | /tbladisyonlar | POST | - | 新建订单头 + 明细 |
//! | /uptbladisyonlar | POST | sync-id | 更新订单头，非空明细整体替换 |

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use shared::{ApiResponse, AppResult, Record};

use super::extract::{parse_body, sync_id_header};
use crate::core::ServerState;
use crate::sync::SyncIdPayload;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/tbladisyonlar", post(create_order))
        .route("/uptbladisyonlar", post(update_order))
}

/// `{ adisyonlar?: {...}, adisyonicerik?: [{...}] }`
#[derive(Debug, Deserialize)]
struct OrderBody {
    #[serde(default)]
    adisyonlar: Option<Record>,
    #[serde(default)]
    adisyonicerik: Option<Vec<Record>>,
}

async fn create_order(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ApiResponse<SyncIdPayload>>)> {
    let body: OrderBody = parse_body(&body)?;
    let sync_id = state
        .orders
        .create_order_with_items(
            body.adisyonlar.unwrap_or_default(),
            body.adisyonicerik.unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Order created", sync_id.into())),
    ))
}

async fn update_order(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<SyncIdPayload>>> {
    let sync_id = sync_id_header(&headers)?;
    let body: OrderBody = parse_body(&body)?;
    state
        .orders
        .replace_order_with_items(
            &sync_id,
            body.adisyonlar.unwrap_or_default(),
            body.adisyonicerik,
        )
        .await?;

    Ok(Json(ApiResponse::success("Order updated", sync_id.into())))
}
