use crate::db::queries;
use crate::error::SyncError;
use crate::models::{PurchaseInvoice, PurchaseInvoiceItem};
use sqlx::PgPool;
use tracing::info;

/// 发票入库服务
///
/// 以外部ID为准的幂等写入: 主表 upsert + 明细整体替换,
/// 同一张发票重复入库不会产生重复行。
pub struct IngestService {
    pool: PgPool,
}

impl IngestService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 单事务内写入一张发票及其明细
    pub async fn ingest(
        &self,
        invoice: &PurchaseInvoice,
        items: &[PurchaseInvoiceItem],
    ) -> Result<(), SyncError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SyncError::db("begin transaction", e))?;

        queries::upsert_invoice(&mut *tx, invoice).await?;
        queries::replace_items(&mut tx, invoice.invoice_id, items).await?;

        tx.commit()
            .await
            .map_err(|e| SyncError::db("commit transaction", e))?;

        info!(
            "✓ 发票 {} 入库完成, {} 行明细",
            invoice.invoice_id,
            items.len()
        );
        Ok(())
    }
}
