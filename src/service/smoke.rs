use crate::api::LocalApiClient;
use crate::error::SyncError;
use serde_json::Value;
use tracing::{info, warn};

/// 冒烟测试参数
#[derive(Debug, Clone)]
pub struct SmokeParams {
    pub branch_id: i64,
    pub date_from: String,
    pub date_to: String,
    pub max_items: u32,
}

/// 同步链路冒烟测试
///
/// 严格顺序执行, 首个失败即中止剩余步骤。
pub struct SyncSmokeTest {
    local: LocalApiClient,
}

impl SyncSmokeTest {
    pub fn new(local: LocalApiClient) -> Self {
        Self { local }
    }

    /// 执行全链路, 返回完成的步骤数
    pub async fn run(&self, params: &SmokeParams) -> Result<usize, SyncError> {
        let mut steps = 0;

        // 1. 健康检查
        let health = self.local.health().await?;
        steps += 1;
        info!("✓ 健康检查: {}", health.trim());

        // 2. 分支列表
        let branches = self.local.branches().await?;
        steps += 1;
        info!("✓ 分支列表: {} 条", count_rows(&branches));

        // 3. 触发同步
        let sync = self
            .local
            .sync_sales_invoices(
                params.branch_id,
                &params.date_from,
                &params.date_to,
                params.max_items,
            )
            .await?;
        steps += 1;
        info!("✓ 同步触发: {}", compact(&sync));

        // 4. 发票列表
        let list = self.local.list_sales_invoices(params.branch_id, 10).await?;
        steps += 1;
        info!("✓ 发票列表: {} 条", count_rows(&list));

        // 5. 首张发票详情 (列表为空则跳过)
        match first_invoice_id(&list) {
            Some(id) => {
                let detail = self.local.get_sales_invoice(id).await?;
                steps += 1;
                info!("✓ 发票详情 {}: {}", id, compact(&detail));
            }
            None => warn!("发票列表为空, 跳过详情步骤"),
        }

        // 6. 汇总统计
        let stats = self.local.summary_stats(params.branch_id).await?;
        steps += 1;
        info!("✓ 汇总统计: {}", compact(&stats));

        Ok(steps)
    }
}

/// 从列表响应中提取第一张发票ID (兼容 {data: [...]} 与裸数组)
fn first_invoice_id(list: &Value) -> Option<i64> {
    let rows = list
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| list.as_array())?;
    rows.first()?.get("id").and_then(Value::as_i64)
}

/// 响应行数 (非数组形状记为0)
fn count_rows(value: &Value) -> usize {
    value
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| value.as_array())
        .map(|rows| rows.len())
        .unwrap_or(0)
}

/// 截断的单行JSON, 用于日志 (按字符截断, 避免切在多字节边界)
fn compact(value: &Value) -> String {
    let text = value.to_string();
    match text.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_invoice_id_reads_data_wrapper() {
        let list = json!({"data": [{"id": 42, "number": "PI-1"}, {"id": 43}]});
        assert_eq!(first_invoice_id(&list), Some(42));
    }

    #[test]
    fn first_invoice_id_reads_bare_array() {
        let list = json!([{"id": 7}]);
        assert_eq!(first_invoice_id(&list), Some(7));
    }

    #[test]
    fn first_invoice_id_empty_list_is_none() {
        assert_eq!(first_invoice_id(&json!({"data": []})), None);
        assert_eq!(first_invoice_id(&json!({"message": "no data"})), None);
    }

    #[test]
    fn count_rows_handles_both_shapes() {
        assert_eq!(count_rows(&json!({"data": [1, 2, 3]})), 3);
        assert_eq!(count_rows(&json!([1])), 1);
        assert_eq!(count_rows(&json!("oops")), 0);
    }

    #[test]
    fn compact_truncates_long_payloads() {
        let long = json!({"blob": "x".repeat(500)});
        let text = compact(&long);
        assert!(text.len() <= 203);
        assert!(text.ends_with("..."));
    }
}
