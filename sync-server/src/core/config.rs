use std::path::PathBuf;
use std::time::Duration;

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Embedded RocksDB under `WORK_DIR`
    RocksDb,
    /// In-memory, lost on exit
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rocksdb" => Some(Self::RocksDb),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | API_KEYS | (空) | 逗号分隔的 API key 白名单 |
/// | STORE_BACKEND | rocksdb | rocksdb 或 memory |
/// | WORK_DIR | ./data | 数据目录 |
/// | SURREAL_NAMESPACE | pos | SurrealDB namespace |
/// | SURREAL_DATABASE | sync | SurrealDB database |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | (无) | 日志目录，设置后按天滚动写文件 |
/// | RECONCILE_INTERVAL_SECS | 60 | 明细日志巡检周期 |
/// | RECONCILE_STALE_AFTER_SECS | 120 | 日志条目超时阈值 |
///
/// # 示例
///
/// ```ignore
/// API_KEYS=k1,k2 STORE_BACKEND=memory cargo run -p sync-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub api_keys: Vec<String>,
    pub store_backend: StoreBackend,
    pub work_dir: String,
    pub surreal_namespace: String,
    pub surreal_database: String,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub reconcile_interval_secs: u64,
    pub reconcile_stale_after_secs: u64,
}

impl Config {
    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(raw) => StoreBackend::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown STORE_BACKEND, falling back to rocksdb");
                StoreBackend::RocksDb
            }),
            Err(_) => StoreBackend::RocksDb,
        };

        Self {
            http_port: env_parse("HTTP_PORT", 3000),
            api_keys: std::env::var("API_KEYS")
                .map(|raw| parse_key_list(&raw))
                .unwrap_or_default(),
            store_backend,
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            surreal_namespace: std::env::var("SURREAL_NAMESPACE").unwrap_or_else(|_| "pos".into()),
            surreal_database: std::env::var("SURREAL_DATABASE").unwrap_or_else(|_| "sync".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            reconcile_interval_secs: env_parse("RECONCILE_INTERVAL_SECS", 60),
            reconcile_stale_after_secs: env_parse("RECONCILE_STALE_AFTER_SECS", 120),
        }
    }

    /// 测试用配置：内存存储 + 指定 API key，不读取环境变量
    pub fn for_testing(api_keys: &[&str]) -> Self {
        Self {
            http_port: 0,
            api_keys: api_keys.iter().map(|k| k.to_string()).collect(),
            store_backend: StoreBackend::Memory,
            work_dir: String::new(),
            surreal_namespace: "pos".into(),
            surreal_database: "sync".into(),
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            reconcile_interval_secs: 60,
            reconcile_stale_after_secs: 120,
        }
    }

    /// RocksDB 数据目录
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("surreal")
    }

    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_secs(self.reconcile_interval_secs.max(1))
    }

    pub fn reconcile_stale_after(&self) -> Duration {
        Duration::from_secs(self.reconcile_stale_after_secs)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated key list, dropping blanks
fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_list() {
        assert_eq!(parse_key_list(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(parse_key_list("").is_empty());
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(StoreBackend::parse("RocksDB"), Some(StoreBackend::RocksDb));
        assert_eq!(StoreBackend::parse("memory"), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("redis"), None);
    }

    #[test]
    fn test_testing_config() {
        let config = Config::for_testing(&["k1"]);
        assert_eq!(config.api_keys, vec!["k1"]);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(!config.is_production());
        assert_eq!(config.reconcile_interval(), Duration::from_secs(60));
    }
}
