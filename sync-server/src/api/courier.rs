//! Courier assignment routes
//!
//! | 路径 | 方法 | Header | 说明 |
//! |------|------|--------|------|
//! | /kuryeatama | GET | subeid | 按分店列出骑手分配 |
//! | /kuryeatamasil | DELETE | docid | 删除一条骑手分配 |

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get},
};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use shared::{ApiResponse, AppResult, Record};

use super::extract::required_header;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/kuryeatama", get(list_assignments))
        .route("/kuryeatamasil", delete(delete_assignment))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedPayload {
    #[serde(rename = "deletedDocID")]
    pub deleted_doc_id: String,
}

async fn list_assignments(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<Vec<Record>>>> {
    let sube_id = required_header(&headers, "subeid")?;
    let records = state.couriers.list_assignments(sube_id).await?;
    Ok(Json(ApiResponse::success(
        "Courier assignments fetched",
        records,
    )))
}

async fn delete_assignment(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<DeletedPayload>>> {
    let doc_id = required_header(&headers, "docid")?;
    let deleted_doc_id = state.couriers.delete_assignment(doc_id).await?;
    Ok(Json(ApiResponse::success(
        "Courier assignment deleted",
        DeletedPayload { deleted_doc_id },
    )))
}
