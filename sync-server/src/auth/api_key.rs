//! API key 认证中间件
//!
//! 每个请求必须带 `x-api-key` 头，且值在配置的白名单中。
//!
//! | 情况 | HTTP 状态码 |
//! |------|------------|
//! | 无 `x-api-key` 头 | 401 AuthMissing |
//! | key 不在白名单中 | 403 AuthInvalid |

use std::collections::HashSet;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;

use crate::core::ServerState;
use crate::security_log;

pub const API_KEY_HEADER: &str = "x-api-key";

/// 允许的 API key 集合
#[derive(Debug, Clone, Default)]
pub struct ApiKeySet {
    keys: HashSet<String>,
}

impl ApiKeySet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 校验 `x-api-key`，通过后才进入处理器
pub async fn require_api_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = match req.headers().get(API_KEY_HEADER) {
        Some(value) => value.to_str().unwrap_or_default(),
        None => {
            security_log!("WARN", "api_key_missing", uri = req.uri().path().to_string());
            return Err(AppError::auth_missing());
        }
    };

    if !state.api_keys.contains(key) {
        security_log!("WARN", "api_key_rejected", uri = req.uri().path().to_string());
        return Err(AppError::auth_invalid());
    }

    Ok(next.run(req).await)
}
