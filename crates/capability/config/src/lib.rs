//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 存储后端选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// 进程内存储，进程退出即丢失。开发与测试默认。
    Memory,
    /// PostgreSQL 存储，需要 ETRACK_DATABASE_URL。
    Postgres,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_access_ttl_seconds: u64,
    pub jwt_refresh_ttl_seconds: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    ///
    /// ETRACK_DATABASE_URL 仅在 ETRACK_STORAGE=postgres 时必填。
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("ETRACK_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("ETRACK_JWT_SECRET".to_string()))?;
        let jwt_access_ttl_seconds =
            read_u64_with_default("ETRACK_JWT_ACCESS_TTL_SECONDS", 900)?;
        let jwt_refresh_ttl_seconds =
            read_u64_with_default("ETRACK_JWT_REFRESH_TTL_SECONDS", 604_800)?;
        let http_addr =
            env::var("ETRACK_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let storage_backend = read_storage_backend("ETRACK_STORAGE")?;
        let database_url = read_optional("ETRACK_DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("ETRACK_DATABASE_URL".to_string()));
        }

        Ok(Self {
            http_addr,
            storage_backend,
            database_url,
            jwt_secret,
            jwt_access_ttl_seconds,
            jwt_refresh_ttl_seconds,
        })
    }
}

fn read_storage_backend(key: &str) -> Result<StorageBackend, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(StorageBackend::Memory),
    };
    match value.to_ascii_lowercase().as_str() {
        "" | "memory" => Ok(StorageBackend::Memory),
        "postgres" => Ok(StorageBackend::Postgres),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
