use accurate_sync_rust::config::DatabaseConfig;
use accurate_sync_rust::db::{create_pool, migrate_apply, migrate_fresh};
use accurate_sync_rust::SyncError;
use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;

/// 迁移入口
///
/// 用法: migrate [apply|fresh]
///   apply - 幂等应用 schema.sql (默认, 保留已有数据)
///   fresh - 破坏性重建 (删表重建)
#[tokio::main]
async fn main() {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    if let Err(e) = run().await {
        error!("✗ 迁移失败: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SyncError> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "apply".to_string());

    // 配置校验先于任何连接
    let config = DatabaseConfig::from_env()?;

    let pool = create_pool(&config.url)
        .await
        .map_err(|e| SyncError::db("connect", e))?;
    info!("Database pool created");

    let result = match mode.as_str() {
        "fresh" => migrate_fresh(&pool).await,
        "apply" => migrate_apply(&pool).await,
        other => Err(SyncError::Config(format!(
            "unknown migrate mode '{}', expected 'fresh' or 'apply'",
            other
        ))),
    };

    // 成功或失败都关闭连接池
    pool.close().await;
    result
}
