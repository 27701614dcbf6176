use crate::api::signature::SignedHeaders;
use crate::config::AccurateConfig;
use crate::error::SyncError;
use serde_json::Value;

/// Accurate API 客户端
///
/// 每次请求重新生成时间戳与签名, 三个认证头加 Content-Type,
/// 服务端按时间戳容忍窗口校验, 不做重试。
pub struct AccurateClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    secret: String,
}

impl AccurateClient {
    pub fn new(config: &AccurateConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            secret: config.signature_secret.clone(),
        }
    }

    /// GET <base>/<resource>.do
    pub async fn get(&self, resource: &str, query: &[(&str, String)]) -> Result<Value, SyncError> {
        let headers = SignedHeaders::new(&self.client_id, &self.secret);
        let response = self
            .http
            .get(self.endpoint(resource))
            .header("Authorization", headers.bearer())
            .header("X-API-Timestamp", &headers.timestamp)
            .header("X-Api-Signature", &headers.signature)
            .header("Content-Type", "application/json")
            .query(query)
            .send()
            .await?;
        Self::into_json(response).await
    }

    /// POST <base>/<resource>.do (JSON body)
    pub async fn post(&self, resource: &str, body: &Value) -> Result<Value, SyncError> {
        let headers = SignedHeaders::new(&self.client_id, &self.secret);
        let response = self
            .http
            .post(self.endpoint(resource))
            .header("Authorization", headers.bearer())
            .header("X-API-Timestamp", &headers.timestamp)
            .header("X-Api-Signature", &headers.signature)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        Self::into_json(response).await
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}.do", self.base_url, resource)
    }

    /// 2xx → JSON; 其他状态码 → ApiStatus, 响应体保留用于排查
    async fn into_json(response: reqwest::Response) -> Result<Value, SyncError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccurateConfig;

    fn test_config() -> AccurateConfig {
        AccurateConfig {
            base_url: "https://account.accurate.id/accurate/api/".to_string(),
            client_id: "client-1".to_string(),
            signature_secret: "testsecret".to_string(),
        }
    }

    #[test]
    fn endpoint_appends_do_suffix_and_trims_slash() {
        let client = AccurateClient::new(&test_config());
        assert_eq!(
            client.endpoint("purchase-invoice/list"),
            "https://account.accurate.id/accurate/api/purchase-invoice/list.do"
        );
    }
}
