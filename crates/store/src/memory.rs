use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use common::{
    Cohort, ExchangeBreakdown, HistoricalPrice, MarketStore, MemberCloses, PricePoint, Result,
    SectorBreakdown, StockProfile, StockRecord, StockWithPrice,
};

#[derive(Debug, Default)]
struct Tables {
    stocks: Vec<StockRecord>,
    prices: Vec<PricePoint>,
}

/// In-process [`MarketStore`] answering the same questions as
/// [`crate::SqliteStore`] over plain vectors. Used as a test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all data. Later duplicates of a symbol or (symbol, date) are dropped.
    pub async fn load(&self, stocks: Vec<StockRecord>, prices: Vec<PricePoint>) {
        let mut unique_stocks: Vec<StockRecord> = Vec::with_capacity(stocks.len());
        for stock in stocks {
            if !unique_stocks.iter().any(|s| s.symbol == stock.symbol) {
                unique_stocks.push(stock);
            }
        }
        let mut unique_prices: Vec<PricePoint> = Vec::with_capacity(prices.len());
        for price in prices {
            if !unique_prices
                .iter()
                .any(|p| p.symbol == price.symbol && p.date == price.date)
            {
                unique_prices.push(price);
            }
        }

        let mut tables = self.tables.write().await;
        tables.stocks = unique_stocks;
        tables.prices = unique_prices;
    }
}

impl Tables {
    fn latest_price_of(&self, symbol: &str) -> Option<&PricePoint> {
        self.prices
            .iter()
            .filter(|p| p.symbol == symbol)
            .max_by_key(|p| p.date)
    }
}

/// Sort by count descending, then name ascending.
fn by_count_then_name<T>(rows: &mut [T], count: impl Fn(&T) -> i64, name: impl Fn(&T) -> &str) {
    rows.sort_by(|a, b| count(b).cmp(&count(a)).then_with(|| name(a).cmp(name(b))));
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn latest_trading_date(&self) -> Result<Option<NaiveDate>> {
        let tables = self.tables.read().await;
        Ok(tables.prices.iter().map(|p| p.date).max())
    }

    async fn cohort_closes(&self, cohort: &Cohort, date: NaiveDate) -> Result<Vec<MemberCloses>> {
        let tables = self.tables.read().await;
        let key = cohort.key();

        let mut rows: Vec<MemberCloses> = tables
            .stocks
            .iter()
            .filter(|s| match cohort {
                Cohort::Layer(_) => s.layer.as_str() == key,
                Cohort::Sector(_) => s.sector.to_uppercase() == key,
            })
            .filter_map(|s| {
                let today = tables
                    .prices
                    .iter()
                    .find(|p| p.symbol == s.symbol && p.date == date)?;
                let previous = tables
                    .prices
                    .iter()
                    .filter(|p| p.symbol == s.symbol && p.date < date)
                    .max_by_key(|p| p.date);
                Some(MemberCloses {
                    symbol: s.symbol.clone(),
                    current_close: today.close,
                    previous_close: previous.map(|p| p.close),
                })
            })
            .collect();

        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(rows)
    }

    async fn latest_prices(&self, limit: u32) -> Result<Vec<StockWithPrice>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<StockWithPrice> = tables
            .stocks
            .iter()
            .filter_map(|s| {
                let p = tables.latest_price_of(&s.symbol)?;
                Some(StockWithPrice {
                    symbol: s.symbol.clone(),
                    name: s.name.clone(),
                    exchange: s.exchange.clone(),
                    sector: s.sector.clone(),
                    latest_date: p.date,
                    open: p.open,
                    high: p.high,
                    low: p.low,
                    close: p.close,
                    volume: p.volume,
                })
            })
            .collect();

        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn stock_profile(&self, symbol: &str) -> Result<Option<StockProfile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .stocks
            .iter()
            .find(|s| s.symbol == symbol)
            .map(|s| StockProfile {
                symbol: s.symbol.clone(),
                name: s.name.clone(),
                exchange: s.exchange.clone(),
                sector: s.sector.clone(),
            }))
    }

    async fn price_history(&self, symbol: &str, days: u32) -> Result<Vec<HistoricalPrice>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<HistoricalPrice> = tables
            .prices
            .iter()
            .filter(|p| p.symbol == symbol)
            .map(|p| HistoricalPrice {
                date: p.date,
                open: p.open,
                high: p.high,
                low: p.low,
                close: p.close,
                volume: p.volume,
                adjusted_close: p.adjusted_close,
            })
            .collect();

        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(days as usize);
        Ok(rows)
    }

    async fn stock_count(&self) -> Result<i64> {
        Ok(self.tables.read().await.stocks.len() as i64)
    }

    async fn volume_on(&self, date: Option<NaiveDate>) -> Result<i64> {
        let Some(date) = date else {
            return Ok(0);
        };
        let tables = self.tables.read().await;
        Ok(tables
            .prices
            .iter()
            .filter(|p| p.date == date)
            .map(|p| p.volume)
            .sum())
    }

    async fn exchange_breakdown(&self, date: Option<NaiveDate>) -> Result<Vec<ExchangeBreakdown>> {
        let tables = self.tables.read().await;
        let mut groups: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
        for stock in &tables.stocks {
            let volume: i64 = match date {
                Some(d) => tables
                    .prices
                    .iter()
                    .filter(|p| p.symbol == stock.symbol && p.date == d)
                    .map(|p| p.volume)
                    .sum(),
                None => 0,
            };
            let entry = groups.entry(stock.exchange.as_str()).or_default();
            entry.0 += 1;
            entry.1 += volume;
        }

        let mut rows: Vec<ExchangeBreakdown> = groups
            .into_iter()
            .map(|(exchange, (stock_count, total_volume))| ExchangeBreakdown {
                exchange: exchange.to_string(),
                stock_count,
                total_volume,
            })
            .collect();
        by_count_then_name(&mut rows, |r| r.stock_count, |r| r.exchange.as_str());
        Ok(rows)
    }

    async fn sector_breakdown(&self) -> Result<Vec<SectorBreakdown>> {
        let tables = self.tables.read().await;
        let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
        for stock in &tables.stocks {
            *groups.entry(stock.sector.as_str()).or_default() += 1;
        }

        let mut rows: Vec<SectorBreakdown> = groups
            .into_iter()
            .map(|(sector, stock_count)| SectorBreakdown {
                sector: sector.to_string(),
                stock_count,
            })
            .collect();
        by_count_then_name(&mut rows, |r| r.stock_count, |r| r.sector.as_str());
        Ok(rows)
    }
}
