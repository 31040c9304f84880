use std::time::Duration;

use crate::auth::JwtConfig;
use crate::db::MEMORY_PATH;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | PORT | 8000 | HTTP 服务端口 |
/// | DATABASE_PATH | ./data/restaurant.db | RocksDB 目录, `memory` 为内存库 |
/// | DB_NAMESPACE | restaurant | SurrealDB namespace |
/// | DB_NAME | restaurant | SurrealDB database |
/// | DB_TIMEOUT_SECS | 100 | 每个请求的数据库截止时间(秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (存在时写入滚动日志文件) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭等待时间(毫秒) |
///
/// JWT 相关变量见 [`JwtConfig::from_env`]。
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库路径
    pub database_path: String,
    pub db_namespace: String,
    pub db_name: String,
    /// 数据库操作截止时间 (秒)
    pub db_timeout_secs: u64,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> crate::core::Result<Self> {
        Ok(Self {
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/restaurant.db".into()),
            db_namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "restaurant".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "restaurant".into()),
            db_timeout_secs: std::env::var("DB_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(100),
            jwt: JwtConfig::from_env()?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        })
    }

    /// 测试配置: 内存数据库 + 固定 JWT 密钥
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_path: MEMORY_PATH.into(),
            db_namespace: "test".into(),
            db_name: "test".into(),
            db_timeout_secs: 10,
            jwt: JwtConfig::with_secret("test-secret-that-is-definitely-long-enough-0123456789"),
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            shutdown_timeout_ms: 1000,
        }
    }

    /// 每个请求的数据库截止时间
    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
