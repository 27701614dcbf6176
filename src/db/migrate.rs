use crate::error::SyncError;
use sqlx::PgPool;
use tracing::info;

/// 破坏性重建: 先删子表再删主表
const DROP_TABLES: [&str; 2] = [
    "DROP TABLE IF EXISTS purchase_invoice_item",
    "DROP TABLE IF EXISTS purchase_invoice CASCADE",
];

/// 采购发票主表
const CREATE_INVOICE: &str = r#"
CREATE TABLE purchase_invoice (
    id              BIGSERIAL PRIMARY KEY,
    invoice_id      BIGINT NOT NULL UNIQUE,
    invoice_number  VARCHAR(100) NOT NULL,
    branch_id       BIGINT NOT NULL,
    vendor_id       BIGINT,
    vendor_name     VARCHAR(255),
    trans_date      DATE,
    invoice_date    DATE,
    due_date        DATE,
    sub_total       NUMERIC(15,2) DEFAULT 0,
    tax_amount      NUMERIC(15,2) DEFAULT 0,
    total_amount    NUMERIC(15,2) DEFAULT 0,
    amount_owing    NUMERIC(15,2) DEFAULT 0,
    status          VARCHAR(50),
    ap_account_no   VARCHAR(50),
    created_by      VARCHAR(100),
    opt_lock        INTEGER NOT NULL DEFAULT 0,
    raw_payload     JSONB,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// 采购发票明细表 (随主表级联删除)
const CREATE_INVOICE_ITEM: &str = r#"
CREATE TABLE purchase_invoice_item (
    id                   BIGSERIAL PRIMARY KEY,
    invoice_id           BIGINT NOT NULL REFERENCES purchase_invoice(invoice_id) ON DELETE CASCADE,
    item_id              BIGINT,
    item_no              VARCHAR(100),
    item_name            VARCHAR(255),
    item_category        VARCHAR(100),
    quantity             NUMERIC(15,4) DEFAULT 0,
    unit_name            VARCHAR(20),
    unit_price           NUMERIC(15,2) DEFAULT 0,
    discount             NUMERIC(15,2) DEFAULT 0,
    amount               NUMERIC(15,2) DEFAULT 0,
    warehouse_name       VARCHAR(100),
    inventory_account_no VARCHAR(50),
    cogs_account_no      VARCHAR(50)
)
"#;

const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX idx_purchase_invoice_branch_date ON purchase_invoice (branch_id, trans_date)",
    "CREATE INDEX idx_purchase_invoice_vendor ON purchase_invoice (vendor_id)",
    "CREATE INDEX idx_purchase_invoice_item_invoice ON purchase_invoice_item (invoice_id)",
];

/// 幂等模式使用的完整 schema 文件
const SCHEMA_SQL: &str = include_str!("../../res/sql/schema.sql");

/// 执行单条语句, 失败时附加语句上下文并中止后续语句
async fn execute(pool: &PgPool, context: &str, sql: &str) -> Result<(), SyncError> {
    info!("执行: {}", context);
    sqlx::query(sql)
        .execute(pool)
        .await
        .map_err(|e| SyncError::db(context.to_string(), e))?;
    Ok(())
}

/// 破坏性重建模式: 删表重建, 适用于可接受不兼容变更的环境
pub async fn migrate_fresh(pool: &PgPool) -> Result<(), SyncError> {
    info!("DB migrate start (fresh)");

    for sql in DROP_TABLES {
        execute(pool, first_line(sql), sql).await?;
    }
    execute(pool, "create table purchase_invoice", CREATE_INVOICE).await?;
    execute(pool, "create table purchase_invoice_item", CREATE_INVOICE_ITEM).await?;
    for sql in CREATE_INDEXES {
        execute(pool, first_line(sql), sql).await?;
    }

    info!("✓ DB migrate done: 2 tables, {} indexes", CREATE_INDEXES.len());
    Ok(())
}

/// 幂等应用模式: 按语句顺序执行 schema.sql,
/// 依赖 IF NOT EXISTS 语义, 适用于需保留数据的环境
pub async fn migrate_apply(pool: &PgPool) -> Result<(), SyncError> {
    info!("DB migrate start (apply)");

    let mut count = 0;
    for (idx, stmt) in chunk_statements(SCHEMA_SQL).enumerate() {
        let context = format!("schema.sql statement #{}: {}", idx + 1, first_line(stmt));
        execute(pool, &context, stmt).await?;
        count += 1;
    }

    info!("✓ DB migrate done: {} statements applied", count);
    Ok(())
}

/// 按分号拆分语句, 跳过空段和纯注释段
pub fn chunk_statements(schema: &str) -> impl Iterator<Item = &str> {
    schema.split(';').map(str::trim).filter(|s| {
        s.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("--")
        })
    })
}

/// 取语句首个非注释行, 用于日志与错误上下文
fn first_line(sql: &str) -> &str {
    sql.lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("--"))
        .unwrap_or("")
}
