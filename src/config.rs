use crate::error::SyncError;

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub accurate: AccurateConfig,
    pub local_api: LocalApiConfig,
}

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Accurate API 配置
#[derive(Debug, Clone)]
pub struct AccurateConfig {
    pub base_url: String,
    pub client_id: String,
    pub signature_secret: String,
}

/// 本地后端配置 (被测服务)
#[derive(Debug, Clone)]
pub struct LocalApiConfig {
    pub base_url: String,
}

/// 读取必需的环境变量, 缺失或为空视为配置错误
fn require_env(name: &str) -> Result<String, SyncError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SyncError::Config(format!(
            "environment variable {} is not set",
            name
        ))),
    }
}

/// 读取可选的环境变量, 缺失或为空时使用默认值
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl DatabaseConfig {
    /// 从环境变量加载 (DATABASE_URL 必填, 不回退默认口令)
    pub fn from_env() -> Result<Self, SyncError> {
        Ok(Self {
            url: require_env("DATABASE_URL")?,
        })
    }
}

impl AccurateConfig {
    /// 从环境变量加载 (client_id 与签名密钥必填)
    pub fn from_env() -> Result<Self, SyncError> {
        Ok(Self {
            base_url: env_or(
                "ACCURATE_API_BASE",
                "https://account.accurate.id/accurate/api",
            ),
            client_id: require_env("ACCURATE_CLIENT_ID")?,
            signature_secret: require_env("ACCURATE_SIGNATURE_SECRET")?,
        })
    }
}

impl LocalApiConfig {
    /// 从环境变量加载 (全部可选)
    pub fn from_env() -> Self {
        Self {
            base_url: env_or("LOCAL_API_BASE", "http://127.0.0.1:3000"),
        }
    }
}

impl AppConfig {
    /// 从环境变量加载全量配置
    pub fn from_env() -> Result<Self, SyncError> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            accurate: AccurateConfig::from_env()?,
            local_api: LocalApiConfig::from_env(),
        })
    }
}
