//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    /// 未配置时宿主使用内置演示目录
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub warn_device_name_conflicts: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("SECADMIN_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let database_url = read_optional("SECADMIN_DATABASE_URL");
        let db_max_connections = read_u32_with_default("SECADMIN_DB_MAX_CONNECTIONS", 8)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "SECADMIN_DB_MAX_CONNECTIONS".to_string(),
                "0".to_string(),
            ));
        }
        let warn_device_name_conflicts =
            read_bool_with_default("SECADMIN_WARN_DEVICE_NAME_CONFLICTS", true);

        Ok(Self {
            http_addr,
            database_url,
            db_max_connections,
            warn_device_name_conflicts,
        })
    }

    /// 是否使用 Postgres 目录。
    pub fn uses_database(&self) -> bool {
        self.database_url.is_some()
    }
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
