use accurate_sync_rust::api::AccurateClient;
use accurate_sync_rust::config::AccurateConfig;
use accurate_sync_rust::SyncError;
use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;

/// Accurate 连通性冒烟测试
///
/// 用法: test-accurate [resource]  (默认 purchase-invoice/list)
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    if let Err(e) = run().await {
        error!("✗ Accurate 连通性测试失败: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SyncError> {
    let resource = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "purchase-invoice/list".to_string());

    let config = AccurateConfig::from_env()?;
    let client = AccurateClient::new(&config);

    info!("GET {}/{}.do", config.base_url.trim_end_matches('/'), resource);
    let response = client
        .get(&resource, &[("sp.pageSize", "5".to_string())])
        .await?;

    let preview = response.to_string();
    let preview = match preview.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &preview[..idx]),
        None => preview,
    };
    info!("✓ 连接成功: {}", preview);
    Ok(())
}
