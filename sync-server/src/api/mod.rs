//! HTTP API
//!
//! # 路由
//!
//! | 模块 | 路径 |
//! |------|------|
//! | [`orders`] | /tbladisyonlar, /uptbladisyonlar |
//! | [`entities`] | /tblmasalar, /tblmusteriler, /tblmasaodemeler, /tbliptaller 及对应 /uptbl* |
//! | [`courier`] | /kuryeatama, /kuryeatamasil |
//! | [`health`] | /, /health |
//!
//! 所有路由都经过 `x-api-key` 校验。

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_api_key;
use crate::core::ServerState;

pub mod courier;
pub mod entities;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod orders;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(orders::router())
        .merge(entities::router())
        .merge(courier::router())
        .merge(health::router())
}

/// Routes with the API key gate and tower-http middleware
///
/// Used by the HTTP server and by router-level tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // API key gate, innermost so rejections are still logged and traced
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}
