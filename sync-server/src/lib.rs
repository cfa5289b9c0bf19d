//! POS Sync Server - 餐厅 POS 数据同步后端
//!
//! # 架构概述
//!
//! POS 终端通过 HTTP 推送桌台、顾客、付款、取消记录和订单。订单由订单头
//! (`Adisyonlar`) 和一组明细 (`AdisyonIcerik`) 组成，明细在每次带非空列表
//! 的更新中整体删除重建。
//!
//! # 模块结构
//!
//! ```text
//! sync-server/src/
//! ├── core/     # 配置、状态、错误、后台任务
//! ├── auth/     # x-api-key 校验
//! ├── store/    # DocumentStore trait + 嵌入式 SurrealDB
//! ├── sync/     # 订单头 / 明细同步、骑手分配、明细日志巡检
//! ├── api/      # HTTP 路由和处理器
//! └── utils/    # 日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod store;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use store::{DocumentStore, SurrealStore};
pub use sync::{OrderSync, SyncError, SyncId};
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 按配置初始化日志
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )
}
