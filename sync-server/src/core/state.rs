use std::sync::Arc;

use crate::auth::ApiKeySet;
use crate::core::{Config, Result, StoreBackend};
use crate::store::{DocumentStore, SurrealStore};
use crate::sync::{CourierDirectory, DetailJournal, DetailReconciler, HeaderWriter, OrderSync};
use tokio_util::sync::CancellationToken;

/// 服务器状态 - 所有请求共享
///
/// Clone 成本低：所有服务都是 `Arc` 或内部持有 `Arc`。
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub api_keys: Arc<ApiKeySet>,
    pub headers: HeaderWriter,
    pub orders: OrderSync,
    pub couriers: CourierDirectory,
    pub journal: DetailJournal,
}

impl ServerState {
    /// 按配置打开存储并组装服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = match config.store_backend {
            StoreBackend::RocksDb => {
                let path = config.database_path();
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| anyhow::anyhow!("create {}: {e}", parent.display()))?;
                }
                Arc::new(
                    SurrealStore::open(&path, &config.surreal_namespace, &config.surreal_database)
                        .await?,
                )
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, data is lost on exit");
                Arc::new(SurrealStore::open_in_memory().await?)
            }
        };

        Ok(Self::with_store(config.clone(), store))
    }

    /// 使用已有存储组装状态 (测试可注入任意 [`DocumentStore`])
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let api_keys = ApiKeySet::new(config.api_keys.iter().cloned());
        if api_keys.is_empty() {
            tracing::warn!("API_KEYS is empty, every request will be rejected");
        } else {
            tracing::info!(count = api_keys.len(), "API keys loaded");
        }

        let headers = HeaderWriter::new(store.clone());
        let journal = DetailJournal::new(store.clone());
        let orders = OrderSync::new(store.clone(), headers.clone(), journal.clone());
        let couriers = CourierDirectory::new(store.clone());

        Self {
            config,
            store,
            api_keys: Arc::new(api_keys),
            headers,
            orders,
            couriers,
            journal,
        }
    }

    /// 构造明细日志巡检任务
    pub fn detail_reconciler(&self, shutdown: CancellationToken) -> DetailReconciler {
        DetailReconciler::new(
            self.store.clone(),
            self.journal.clone(),
            self.config.reconcile_interval(),
            self.config.reconcile_stale_after(),
            shutdown,
        )
    }
}
