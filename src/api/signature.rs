use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 计算时间戳签名: HMAC-SHA256(key=secret, message=timestamp), 小写十六进制
pub fn sign_timestamp(secret: &str, timestamp: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 当前UTC时间戳 (ISO-8601, 毫秒精度, Z 后缀)
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 签名请求头三元组
///
/// 时间戳只采集一次: 参与签名的字符串与 X-API-Timestamp 头
/// 发送的字符串必须是同一个, 否则服务端校验必然失败。
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub client_id: String,
    pub timestamp: String,
    pub signature: String,
}

impl SignedHeaders {
    pub fn new(client_id: &str, secret: &str) -> Self {
        let timestamp = current_timestamp();
        let signature = sign_timestamp(secret, &timestamp);
        Self {
            client_id: client_id.to_string(),
            timestamp,
            signature,
        }
    }

    /// Authorization 头的值
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.client_id)
    }
}
