use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// 采购发票主表 (purchase_invoice)
///
/// invoice_id 为 Accurate 侧分配的外部ID, 全库唯一;
/// created_at/updated_at 由数据库赋值, 不在模型中携带。
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PurchaseInvoice {
    pub invoice_id: i64,
    pub invoice_number: String,
    pub branch_id: i64,
    pub vendor_id: Option<i64>,
    pub vendor_name: Option<String>,
    pub trans_date: Option<NaiveDate>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub sub_total: Option<BigDecimal>,
    pub tax_amount: Option<BigDecimal>,
    pub total_amount: Option<BigDecimal>,
    pub amount_owing: Option<BigDecimal>,
    pub status: Option<String>,
    pub ap_account_no: Option<String>,
    pub created_by: Option<String>,
    pub opt_lock: i32,
    pub raw_payload: Option<Value>,
}

/// 采购发票明细表 (purchase_invoice_item)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PurchaseInvoiceItem {
    pub invoice_id: i64,       // 关联主表外部ID
    pub item_id: Option<i64>,  // 明细外部ID
    pub item_no: Option<String>,
    pub item_name: Option<String>,
    pub item_category: Option<String>,
    pub quantity: Option<BigDecimal>,     // 数量 (4位小数)
    pub unit_name: Option<String>,
    pub unit_price: Option<BigDecimal>,   // 单价 (2位小数)
    pub discount: Option<BigDecimal>,
    pub amount: Option<BigDecimal>,       // 行金额
    pub warehouse_name: Option<String>,
    pub inventory_account_no: Option<String>,
    pub cogs_account_no: Option<String>,
}

/// 分支发票汇总结果
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceStats {
    pub cnt: i64,
    pub sum_total: BigDecimal,
}
