use common::Result;

use crate::SqliteStore;

const REQUIRED_TABLES: [&str; 2] = ["stocks", "stock_prices"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStat {
    pub name: String,
    pub rows: i64,
}

/// Outcome of [`SqliteStore::verify_schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaReport {
    pub tables: Vec<TableStat>,
    pub missing: Vec<String>,
    /// Indexes defined on `stock_prices`.
    pub indexes: Vec<String>,
}

impl SchemaReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl SqliteStore {
    /// Check that the required tables exist and collect row counts and indexes.
    pub async fn verify_schema(&self) -> Result<SchemaReport> {
        let existing: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name IN ('stocks', 'stock_prices')
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut report = SchemaReport::default();
        for table in REQUIRED_TABLES {
            if !existing.iter().any(|t| t == table) {
                report.missing.push(table.to_string());
                continue;
            }
            // table names come from REQUIRED_TABLES, never from input
            let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&self.pool)
                .await?;
            report.tables.push(TableStat {
                name: table.to_string(),
                rows,
            });
        }

        report.indexes = sqlx::query_scalar(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'index' AND tbl_name = 'stock_prices'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(report)
    }
}
