use thiserror::Error;

/// 同步工具错误分类
///
/// Network 与 ApiStatus 的区别: 前者未收到响应 (DNS/连接失败),
/// 后者收到响应但状态码非 2xx, 响应体保留用于排查。
#[derive(Debug, Error)]
pub enum SyncError {
    /// 配置错误: 缺少必需的环境变量
    #[error("Config error: {0}")]
    Config(String),

    /// 网络错误: 请求发出后未收到响应
    #[error("Network error (no response): {0}")]
    Network(#[from] reqwest::Error),

    /// API错误: 收到非 2xx 响应
    #[error("API error: status {status}, body: {body}")]
    ApiStatus { status: u16, body: String },

    /// 数据库错误: 携带语句上下文
    #[error("Database error ({context}): {source}")]
    Database {
        context: String,
        #[source]
        source: sqlx::Error,
    },
}

impl SyncError {
    /// 构造带语句上下文的数据库错误
    pub fn db(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            context: context.into(),
            source,
        }
    }
}
