use accurate_sync_rust::api::{sign_timestamp, SignedHeaders};
use accurate_sync_rust::config::AccurateConfig;
use accurate_sync_rust::SyncError;
use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;

/// 签名冒烟测试: 不发网络请求, 仅验证签名生成
fn main() {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    if let Err(e) = run() {
        error!("✗ 签名测试失败: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SyncError> {
    let config = AccurateConfig::from_env()?;

    let headers = SignedHeaders::new(&config.client_id, &config.signature_secret);
    info!("Authorization: {}", headers.bearer());
    info!("X-API-Timestamp: {}", headers.timestamp);
    info!("X-Api-Signature: {}", headers.signature);
    info!("✓ 签名长度: {} (期望 64)", headers.signature.len());

    // 同一时间戳字符串复算必须得到同一签名
    let recomputed = sign_timestamp(&config.signature_secret, &headers.timestamp);
    if recomputed == headers.signature {
        info!("✓ 确定性校验通过");
    } else {
        error!("✗ 确定性校验失败");
        std::process::exit(1);
    }

    Ok(())
}
