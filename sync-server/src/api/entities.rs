//! Single-document header routes
//!
//! Tables, customers, table payments and cancellations are plain headers with
//! no detail set. Create returns 201 `{ syncID }`; update takes `sync-id` and
//! merges the body into the stored record.
//!
//! The customer update path is `/upttblmusteriler` (double `t`), which is what
//! deployed POS clients call.

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use http::{HeaderMap, StatusCode};
use shared::{ApiResponse, AppResult, Record};

use super::extract::{parse_body, sync_id_header, unwrap_entity};
use crate::core::ServerState;
use crate::sync::{Collection, SyncIdPayload};

/// A header collection exposed over HTTP
#[derive(Debug, Clone, Copy)]
struct Entity {
    collection: Collection,
    /// Body key the record may be wrapped under
    wrapper: &'static str,
    create_path: &'static str,
    update_path: &'static str,
}

const ENTITIES: [Entity; 4] = [
    Entity {
        collection: Collection::Tables,
        wrapper: "masalar",
        create_path: "/tblmasalar",
        update_path: "/uptblmasalar",
    },
    Entity {
        collection: Collection::Customers,
        wrapper: "musteriler",
        create_path: "/tblmusteriler",
        update_path: "/upttblmusteriler",
    },
    Entity {
        collection: Collection::TablePayments,
        wrapper: "masaodemeler",
        create_path: "/tblmasaodemeler",
        update_path: "/uptblmasaodemeler",
    },
    Entity {
        collection: Collection::Cancellations,
        wrapper: "iptaller",
        create_path: "/tbliptaller",
        update_path: "/uptbliptaller",
    },
];

pub fn router() -> Router<ServerState> {
    ENTITIES.iter().fold(Router::new(), |router, &entity| {
        router
            .route(
                entity.create_path,
                post(move |state: State<ServerState>, body: Bytes| {
                    create_entity(state, entity, body)
                }),
            )
            .route(
                entity.update_path,
                post(
                    move |state: State<ServerState>, headers: HeaderMap, body: Bytes| {
                        update_entity(state, entity, headers, body)
                    },
                ),
            )
    })
}

async fn create_entity(
    State(state): State<ServerState>,
    entity: Entity,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ApiResponse<SyncIdPayload>>)> {
    let record = unwrap_entity(parse_body::<Record>(&body)?, entity.wrapper);
    let sync_id = state.headers.create(entity.collection, record).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            format!("{} created", entity.collection.label()),
            sync_id.into(),
        )),
    ))
}

async fn update_entity(
    State(state): State<ServerState>,
    entity: Entity,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<SyncIdPayload>>> {
    let sync_id = sync_id_header(&headers)?;
    let patch = unwrap_entity(parse_body::<Record>(&body)?, entity.wrapper);
    state
        .headers
        .update(entity.collection, &sync_id, patch)
        .await?;

    Ok(Json(ApiResponse::success(
        format!("{} updated", entity.collection.label()),
        sync_id.into(),
    )))
}
