use crate::error::SyncError;
use serde_json::Value;

/// 本地后端客户端 (被测服务, 无需签名)
pub struct LocalApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl LocalApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET / 健康检查, 返回原始响应文本
    pub async fn health(&self) -> Result<String, SyncError> {
        let response = self.http.get(&self.base_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }

    /// GET /api/branches
    pub async fn branches(&self) -> Result<Value, SyncError> {
        self.get_json("/api/branches", &[]).await
    }

    /// POST /api/sales-invoices/sync?branchId&dateFrom&dateTo&maxItems
    pub async fn sync_sales_invoices(
        &self,
        branch_id: i64,
        date_from: &str,
        date_to: &str,
        max_items: u32,
    ) -> Result<Value, SyncError> {
        let url = format!("{}/api/sales-invoices/sync", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[
                ("branchId", branch_id.to_string()),
                ("dateFrom", date_from.to_string()),
                ("dateTo", date_to.to_string()),
                ("maxItems", max_items.to_string()),
            ])
            .send()
            .await?;
        Self::into_json(response).await
    }

    /// GET /api/sales-invoices?branchId&limit
    pub async fn list_sales_invoices(&self, branch_id: i64, limit: u32) -> Result<Value, SyncError> {
        self.get_json(
            "/api/sales-invoices",
            &[
                ("branchId", branch_id.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// GET /api/sales-invoices/:id
    pub async fn get_sales_invoice(&self, id: i64) -> Result<Value, SyncError> {
        self.get_json(&format!("/api/sales-invoices/{}", id), &[]).await
    }

    /// GET /api/sales-invoices/summary/stats?branchId
    pub async fn summary_stats(&self, branch_id: i64) -> Result<Value, SyncError> {
        self.get_json(
            "/api/sales-invoices/summary/stats",
            &[("branchId", branch_id.to_string())],
        )
        .await
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, SyncError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;
        Self::into_json(response).await
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

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = LocalApiClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.base_url, "http://127.0.0.1:3000");
    }
}
