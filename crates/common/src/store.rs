use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    Cohort, ExchangeBreakdown, HistoricalPrice, MemberCloses, Result, SectorBreakdown,
    StockProfile, StockWithPrice,
};

/// Read access to the `stocks` / `stock_prices` tables.
///
/// `SqliteStore` implements this against the database.
/// `MemoryStore` implements this over in-process vectors for tests.
///
/// Consumers hold an `Arc<dyn MarketStore>`; nothing else in the workspace
/// reaches for a connection pool directly. Failures are returned as-is and
/// never retried.
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<()>;

    /// Greatest `date` across all prices, or `None` if there are none.
    async fn latest_trading_date(&self) -> Result<Option<NaiveDate>>;

    /// Members of `cohort` that have a price on `date`, with their close on
    /// `date` and their close on the most recent earlier date. Ordered by symbol.
    async fn cohort_closes(&self, cohort: &Cohort, date: NaiveDate) -> Result<Vec<MemberCloses>>;

    /// Latest price row of every stock that has one, ordered by symbol.
    async fn latest_prices(&self, limit: u32) -> Result<Vec<StockWithPrice>>;

    async fn stock_profile(&self, symbol: &str) -> Result<Option<StockProfile>>;

    /// Up to `days` most recent rows for `symbol`, newest first.
    async fn price_history(&self, symbol: &str, days: u32) -> Result<Vec<HistoricalPrice>>;

    async fn stock_count(&self) -> Result<i64>;

    /// Total traded volume on `date`; 0 when `date` is `None` or has no rows.
    async fn volume_on(&self, date: Option<NaiveDate>) -> Result<i64>;

    /// Stock count per exchange with volume traded on `date`.
    async fn exchange_breakdown(&self, date: Option<NaiveDate>) -> Result<Vec<ExchangeBreakdown>>;

    async fn sector_breakdown(&self) -> Result<Vec<SectorBreakdown>>;
}
