use crate::error::SyncError;
use crate::models::{InvoiceStats, PurchaseInvoice, PurchaseInvoiceItem};
use sqlx::{PgConnection, PgPool};

/// 主表 upsert: 以外部ID为冲突键, 重复入库走更新分支,
/// 更新时递增乐观锁并刷新 updated_at
const UPSERT_INVOICE_SQL: &str = r#"
INSERT INTO purchase_invoice (
    invoice_id, invoice_number, branch_id, vendor_id, vendor_name,
    trans_date, invoice_date, due_date,
    sub_total, tax_amount, total_amount, amount_owing,
    status, ap_account_no, created_by, raw_payload
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
ON CONFLICT (invoice_id) DO UPDATE SET
    invoice_number = EXCLUDED.invoice_number,
    branch_id = EXCLUDED.branch_id,
    vendor_id = EXCLUDED.vendor_id,
    vendor_name = EXCLUDED.vendor_name,
    trans_date = EXCLUDED.trans_date,
    invoice_date = EXCLUDED.invoice_date,
    due_date = EXCLUDED.due_date,
    sub_total = EXCLUDED.sub_total,
    tax_amount = EXCLUDED.tax_amount,
    total_amount = EXCLUDED.total_amount,
    amount_owing = EXCLUDED.amount_owing,
    status = EXCLUDED.status,
    ap_account_no = EXCLUDED.ap_account_no,
    created_by = EXCLUDED.created_by,
    raw_payload = EXCLUDED.raw_payload,
    opt_lock = purchase_invoice.opt_lock + 1,
    updated_at = now()
"#;

/// 按外部ID写入或更新主表
pub async fn upsert_invoice<'e, E>(executor: E, inv: &PurchaseInvoice) -> Result<(), SyncError>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(UPSERT_INVOICE_SQL)
        .bind(inv.invoice_id)
        .bind(&inv.invoice_number)
        .bind(inv.branch_id)
        .bind(inv.vendor_id)
        .bind(&inv.vendor_name)
        .bind(inv.trans_date)
        .bind(inv.invoice_date)
        .bind(inv.due_date)
        .bind(inv.sub_total.clone())
        .bind(inv.tax_amount.clone())
        .bind(inv.total_amount.clone())
        .bind(inv.amount_owing.clone())
        .bind(&inv.status)
        .bind(&inv.ap_account_no)
        .bind(&inv.created_by)
        .bind(inv.raw_payload.clone())
        .execute(executor)
        .await
        .map_err(|e| SyncError::db(format!("upsert invoice {}", inv.invoice_id), e))?;
    Ok(())
}

/// 整体替换明细: 先删后批量插入 (每1000条分块)
pub async fn replace_items(
    conn: &mut PgConnection,
    invoice_id: i64,
    items: &[PurchaseInvoiceItem],
) -> Result<(), SyncError> {
    sqlx::query("DELETE FROM purchase_invoice_item WHERE invoice_id = $1")
        .bind(invoice_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| SyncError::db(format!("delete items of invoice {}", invoice_id), e))?;

    if items.is_empty() {
        return Ok(());
    }

    for chunk in items.chunks(1000) {
        let mut query_builder = sqlx::QueryBuilder::new(
            "INSERT INTO purchase_invoice_item (
                invoice_id, item_id, item_no, item_name, item_category,
                quantity, unit_name, unit_price, discount, amount,
                warehouse_name, inventory_account_no, cogs_account_no
            ) ",
        );

        query_builder.push_values(chunk, |mut b, item| {
            b.push_bind(invoice_id)
                .push_bind(item.item_id)
                .push_bind(item.item_no.clone())
                .push_bind(item.item_name.clone())
                .push_bind(item.item_category.clone())
                .push_bind(item.quantity.clone())
                .push_bind(item.unit_name.clone())
                .push_bind(item.unit_price.clone())
                .push_bind(item.discount.clone())
                .push_bind(item.amount.clone())
                .push_bind(item.warehouse_name.clone())
                .push_bind(item.inventory_account_no.clone())
                .push_bind(item.cogs_account_no.clone());
        });

        query_builder
            .build()
            .execute(&mut *conn)
            .await
            .map_err(|e| SyncError::db(format!("insert items of invoice {}", invoice_id), e))?;
    }

    Ok(())
}

/// 按外部ID查询主表
pub async fn get_invoice(
    pool: &PgPool,
    invoice_id: i64,
) -> Result<Option<PurchaseInvoice>, SyncError> {
    sqlx::query_as::<_, PurchaseInvoice>(
        r#"
        SELECT invoice_id, invoice_number, branch_id, vendor_id, vendor_name,
               trans_date, invoice_date, due_date,
               sub_total, tax_amount, total_amount, amount_owing,
               status, ap_account_no, created_by, opt_lock, raw_payload
        FROM purchase_invoice
        WHERE invoice_id = $1
        "#,
    )
    .bind(invoice_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| SyncError::db(format!("get invoice {}", invoice_id), e))
}

/// 查询发票明细列表
pub async fn list_items(
    pool: &PgPool,
    invoice_id: i64,
) -> Result<Vec<PurchaseInvoiceItem>, SyncError> {
    sqlx::query_as::<_, PurchaseInvoiceItem>(
        r#"
        SELECT invoice_id, item_id, item_no, item_name, item_category,
               quantity, unit_name, unit_price, discount, amount,
               warehouse_name, inventory_account_no, cogs_account_no
        FROM purchase_invoice_item
        WHERE invoice_id = $1
        ORDER BY id
        "#,
    )
    .bind(invoice_id)
    .fetch_all(pool)
    .await
    .map_err(|e| SyncError::db(format!("list items of invoice {}", invoice_id), e))
}

/// 按外部ID删除主表 (明细随外键级联删除)
pub async fn delete_invoice(pool: &PgPool, invoice_id: i64) -> Result<u64, SyncError> {
    let result = sqlx::query("DELETE FROM purchase_invoice WHERE invoice_id = $1")
        .bind(invoice_id)
        .execute(pool)
        .await
        .map_err(|e| SyncError::db(format!("delete invoice {}", invoice_id), e))?;
    Ok(result.rows_affected())
}

/// 统计分支下发票数量与总金额
pub async fn invoice_stats(pool: &PgPool, branch_id: i64) -> Result<InvoiceStats, SyncError> {
    sqlx::query_as::<_, InvoiceStats>(
        r#"
        SELECT count(*) as cnt,
               coalesce(sum(total_amount), 0) as sum_total
        FROM purchase_invoice
        WHERE branch_id = $1
        "#,
    )
    .bind(branch_id)
    .fetch_one(pool)
    .await
    .map_err(|e| SyncError::db(format!("invoice stats of branch {}", branch_id), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_targets_external_id_conflict() {
        assert!(UPSERT_INVOICE_SQL.contains("ON CONFLICT (invoice_id) DO UPDATE"));
    }

    #[test]
    fn upsert_bumps_optimistic_lock() {
        assert!(UPSERT_INVOICE_SQL.contains("opt_lock = purchase_invoice.opt_lock + 1"));
        assert!(UPSERT_INVOICE_SQL.contains("updated_at = now()"));
    }

    #[test]
    fn upsert_never_updates_external_id() {
        let update_arm = UPSERT_INVOICE_SQL
            .split("DO UPDATE SET")
            .nth(1)
            .expect("update arm");
        assert!(!update_arm.contains("invoice_id ="));
    }
}
