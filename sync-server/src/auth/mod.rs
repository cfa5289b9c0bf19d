//! 认证模块 - 静态共享密钥 (`x-api-key`)

pub mod api_key;

pub use api_key::{API_KEY_HEADER, ApiKeySet, require_api_key};
