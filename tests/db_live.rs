//! 需要真实 PostgreSQL 的集成测试, 默认忽略。
//!
//! 运行方式 (各用例会重建表, 请指向一次性测试库并串行执行):
//!   DATABASE_URL=postgres://... cargo test --test db_live -- --ignored --test-threads=1

use accurate_sync_rust::db::{create_pool, migrate_apply, migrate_fresh, queries};
use accurate_sync_rust::models::{PurchaseInvoice, PurchaseInvoiceItem};
use accurate_sync_rust::service::IngestService;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde_json::json;
use std::str::FromStr;

async fn test_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live tests");
    create_pool(&url).await.expect("connect")
}

fn dec(s: &str) -> Option<BigDecimal> {
    Some(BigDecimal::from_str(s).expect("decimal"))
}

fn sample_invoice(invoice_id: i64) -> PurchaseInvoice {
    PurchaseInvoice {
        invoice_id,
        invoice_number: format!("PI-{}", invoice_id),
        branch_id: 50,
        vendor_id: Some(300),
        vendor_name: Some("PT Sumber Makmur".to_string()),
        trans_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        invoice_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        due_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        sub_total: dec("100000.00"),
        tax_amount: dec("11000.00"),
        total_amount: dec("111000.00"),
        amount_owing: dec("111000.00"),
        status: Some("OPEN".to_string()),
        ap_account_no: Some("2101".to_string()),
        created_by: Some("admin".to_string()),
        opt_lock: 0,
        raw_payload: Some(json!({"source": "accurate", "id": invoice_id})),
    }
}

fn sample_item(invoice_id: i64, item_id: i64) -> PurchaseInvoiceItem {
    PurchaseInvoiceItem {
        invoice_id,
        item_id: Some(item_id),
        item_no: Some(format!("ITM-{}", item_id)),
        item_name: Some("Kertas A4".to_string()),
        item_category: Some("ATK".to_string()),
        quantity: dec("10.0000"),
        unit_name: Some("BOX".to_string()),
        unit_price: dec("10000.00"),
        discount: dec("0.00"),
        amount: dec("100000.00"),
        warehouse_name: Some("Utama".to_string()),
        inventory_account_no: Some("1401".to_string()),
        cogs_account_no: Some("5101".to_string()),
    }
}

#[tokio::test]
#[ignore]
async fn apply_mode_is_repeatable() {
    let pool = test_pool().await;
    migrate_fresh(&pool).await.expect("fresh");
    // 幂等模式在已建库上重复执行不报错
    migrate_apply(&pool).await.expect("first apply");
    migrate_apply(&pool).await.expect("second apply");
    pool.close().await;
}

#[tokio::test]
#[ignore]
async fn fresh_migration_creates_expected_shape() {
    let pool = test_pool().await;
    migrate_fresh(&pool).await.expect("migrate");

    let (cols,): (i64,) = sqlx::query_as(
        "SELECT count(*) FROM information_schema.columns WHERE table_name = 'purchase_invoice'",
    )
    .fetch_one(&pool)
    .await
    .expect("columns");
    assert_eq!(cols, 20);

    let (idx,): (i64,) = sqlx::query_as(
        "SELECT count(*) FROM pg_indexes WHERE tablename = 'purchase_invoice' \
         AND indexname IN ('idx_purchase_invoice_branch_date', 'idx_purchase_invoice_vendor')",
    )
    .fetch_one(&pool)
    .await
    .expect("indexes");
    assert_eq!(idx, 2);
    pool.close().await;
}

#[tokio::test]
#[ignore]
async fn item_with_unknown_invoice_id_violates_fk() {
    let pool = test_pool().await;
    migrate_fresh(&pool).await.expect("migrate");

    let mut conn = pool.acquire().await.expect("acquire");
    let result =
        queries::replace_items(&mut conn, 999_999_999, &[sample_item(999_999_999, 1)]).await;
    drop(conn);

    assert!(result.is_err(), "insert referencing missing header must fail");
    pool.close().await;
}

#[tokio::test]
#[ignore]
async fn delete_header_cascades_to_items() {
    let pool = test_pool().await;
    migrate_fresh(&pool).await.expect("migrate");

    let ingest = IngestService::new(pool.clone());
    ingest
        .ingest(&sample_invoice(1001), &[sample_item(1001, 1), sample_item(1001, 2)])
        .await
        .expect("ingest");

    let deleted = queries::delete_invoice(&pool, 1001).await.expect("delete");
    assert_eq!(deleted, 1);

    let orphans = queries::list_items(&pool, 1001).await.expect("list");
    assert!(orphans.is_empty(), "cascade delete must leave no orphan items");
    pool.close().await;
}

#[tokio::test]
#[ignore]
async fn reingest_updates_instead_of_duplicating() {
    let pool = test_pool().await;
    migrate_fresh(&pool).await.expect("migrate");

    let ingest = IngestService::new(pool.clone());
    let mut invoice = sample_invoice(2002);
    ingest
        .ingest(&invoice, &[sample_item(2002, 1)])
        .await
        .expect("first ingest");

    invoice.status = Some("PAID".to_string());
    ingest
        .ingest(&invoice, &[sample_item(2002, 1)])
        .await
        .expect("second ingest");

    let stored = queries::get_invoice(&pool, 2002)
        .await
        .expect("get")
        .expect("row exists");
    assert_eq!(stored.status.as_deref(), Some("PAID"));
    // 第二次写入走更新分支, 乐观锁递增
    assert_eq!(stored.opt_lock, 1);

    let items = queries::list_items(&pool, 2002).await.expect("list");
    assert_eq!(items.len(), 1);

    let stats = queries::invoice_stats(&pool, 50).await.expect("stats");
    assert_eq!(stats.cnt, 1);
    pool.close().await;
}
