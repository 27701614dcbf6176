use accurate_sync_rust::api::LocalApiClient;
use accurate_sync_rust::config::LocalApiConfig;
use accurate_sync_rust::service::{SmokeParams, SyncSmokeTest};
use accurate_sync_rust::SyncError;
use chrono::{Duration, Utc};
use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;

/// 同步链路冒烟测试
///
/// 用法: test-sync [branch_id] [date_from] [date_to] [max_items]
/// 日期默认最近30天。
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    if let Err(e) = run().await {
        error!("✗ 冒烟测试失败: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SyncError> {
    let args: Vec<String> = std::env::args().collect();
    let today = Utc::now().date_naive();

    let params = SmokeParams {
        branch_id: args.get(1).and_then(|v| v.parse().ok()).unwrap_or(1),
        date_from: args
            .get(2)
            .cloned()
            .unwrap_or_else(|| (today - Duration::days(30)).to_string()),
        date_to: args.get(3).cloned().unwrap_or_else(|| today.to_string()),
        max_items: args.get(4).and_then(|v| v.parse().ok()).unwrap_or(10),
    };

    let config = LocalApiConfig::from_env();
    info!("目标服务: {}", config.base_url);
    info!("参数: {:?}", params);

    let smoke = SyncSmokeTest::new(LocalApiClient::new(&config.base_url));
    let steps = smoke.run(&params).await?;

    info!("✓ 冒烟测试完成, 共 {} 步", steps);
    Ok(())
}
