use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use common::{
    Cohort, ExchangeBreakdown, HistoricalPrice, MarketStore, MemberCloses, PricePoint, Result,
    SectorBreakdown, StockProfile, StockRecord, StockWithPrice,
};

/// [`MarketStore`] backed by the shared SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pub(crate) pool: SqlitePool,
}

/// Row counts written by [`SqliteStore::replace_all`].
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub stocks: u64,
    pub prices: u64,
    pub sectors: Vec<SectorBreakdown>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Pending acquires fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }

    /// Replace the contents of both tables in a single transaction.
    /// Duplicate symbols or (symbol, date) pairs in the input are skipped.
    pub async fn replace_all(
        &self,
        stocks: &[StockRecord],
        prices: &[PricePoint],
    ) -> Result<SeedReport> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        // prices first: they reference stocks
        sqlx::query("DELETE FROM stock_prices").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM stocks").execute(&mut *tx).await?;

        let mut stock_rows = 0;
        for stock in stocks {
            stock_rows += sqlx::query(
                r#"
                INSERT INTO stocks (
                    symbol, name, exchange, industry, sector, layer,
                    listing_date, outstanding_shares, market_cap
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT(symbol) DO NOTHING
                "#,
            )
            .bind(&stock.symbol)
            .bind(&stock.name)
            .bind(&stock.exchange)
            .bind(&stock.industry)
            .bind(&stock.sector)
            .bind(stock.layer)
            .bind(stock.listing_date)
            .bind(stock.outstanding_shares)
            .bind(stock.market_cap)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        let mut price_rows = 0;
        for price in prices {
            price_rows += sqlx::query(
                r#"
                INSERT INTO stock_prices (
                    symbol, date, open, high, low, close, volume, adjusted_close
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(symbol, date) DO NOTHING
                "#,
            )
            .bind(&price.symbol)
            .bind(price.date)
            .bind(price.open)
            .bind(price.high)
            .bind(price.low)
            .bind(price.close)
            .bind(price.volume)
            .bind(price.adjusted_close)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        info!(
            stocks = stock_rows,
            prices = price_rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Market data replaced"
        );

        Ok(SeedReport {
            stocks: stock_rows,
            prices: price_rows,
            sectors: self.sector_breakdown().await?,
        })
    }
}

#[async_trait]
impl MarketStore for SqliteStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn latest_trading_date(&self) -> Result<Option<NaiveDate>> {
        let date: Option<NaiveDate> = sqlx::query_scalar("SELECT MAX(date) FROM stock_prices")
            .fetch_one(&self.pool)
            .await?;
        Ok(date)
    }

    async fn cohort_closes(&self, cohort: &Cohort, date: NaiveDate) -> Result<Vec<MemberCloses>> {
        let started = Instant::now();
        let column = match cohort {
            Cohort::Layer(_) => "layer",
            Cohort::Sector(_) => "sector",
        };
        let sql = format!(
            r#"
            SELECT
                s.symbol AS symbol,
                today.close AS current_close,
                (
                    SELECT prev.close
                    FROM stock_prices prev
                    WHERE prev.symbol = s.symbol AND prev.date < ?1
                    ORDER BY prev.date DESC
                    LIMIT 1
                ) AS previous_close
            FROM stocks s
            INNER JOIN stock_prices today ON today.symbol = s.symbol AND today.date = ?1
            WHERE UPPER(s.{column}) = ?2
            ORDER BY s.symbol
            "#
        );

        let rows = sqlx::query_as::<_, MemberCloses>(&sql)
            .bind(date)
            .bind(cohort.key())
            .fetch_all(&self.pool)
            .await?;

        debug!(
            %cohort,
            %date,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Executed cohort query"
        );
        Ok(rows)
    }

    async fn latest_prices(&self, limit: u32) -> Result<Vec<StockWithPrice>> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, StockWithPrice>(
            r#"
            SELECT
                s.symbol, s.name, s.exchange, s.sector,
                p.date AS latest_date,
                p.open, p.high, p.low, p.close, p.volume
            FROM stocks s
            INNER JOIN stock_prices p
                ON p.symbol = s.symbol
               AND p.date = (SELECT MAX(date) FROM stock_prices WHERE symbol = s.symbol)
            ORDER BY s.symbol
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Executed latest prices query"
        );
        Ok(rows)
    }

    async fn stock_profile(&self, symbol: &str) -> Result<Option<StockProfile>> {
        let profile = sqlx::query_as::<_, StockProfile>(
            "SELECT symbol, name, exchange, sector FROM stocks WHERE symbol = ?1",
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn price_history(&self, symbol: &str, days: u32) -> Result<Vec<HistoricalPrice>> {
        let rows = sqlx::query_as::<_, HistoricalPrice>(
            r#"
            SELECT date, open, high, low, close, volume, adjusted_close
            FROM stock_prices
            WHERE symbol = ?1
            ORDER BY date DESC
            LIMIT ?2
            "#,
        )
        .bind(symbol)
        .bind(i64::from(days))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn stock_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stocks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn volume_on(&self, date: Option<NaiveDate>) -> Result<i64> {
        let Some(date) = date else {
            return Ok(0);
        };
        let volume: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(volume), 0) FROM stock_prices WHERE date = ?1")
                .bind(date)
                .fetch_one(&self.pool)
                .await?;
        Ok(volume)
    }

    async fn exchange_breakdown(&self, date: Option<NaiveDate>) -> Result<Vec<ExchangeBreakdown>> {
        // A NULL date matches no price rows, leaving every volume at 0.
        let rows = sqlx::query_as::<_, ExchangeBreakdown>(
            r#"
            SELECT
                s.exchange AS exchange,
                COUNT(s.symbol) AS stock_count,
                COALESCE(SUM(sp.volume), 0) AS total_volume
            FROM stocks s
            LEFT JOIN stock_prices sp ON sp.symbol = s.symbol AND sp.date = ?1
            GROUP BY s.exchange
            ORDER BY stock_count DESC, s.exchange ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn sector_breakdown(&self) -> Result<Vec<SectorBreakdown>> {
        let rows = sqlx::query_as::<_, SectorBreakdown>(
            r#"
            SELECT sector, COUNT(*) AS stock_count
            FROM stocks
            GROUP BY sector
            ORDER BY stock_count DESC, sector ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
