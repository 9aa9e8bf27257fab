//! Price-history reads: latest quotes, per-symbol history, market summary.

use tracing::debug;

use common::{MarketStore, MarketSummary, Result, StockHistory, StockWithPrice};

/// Most recent price row of every stock, ordered by symbol.
pub async fn latest_prices(store: &dyn MarketStore, limit: u32) -> Result<Vec<StockWithPrice>> {
    store.latest_prices(limit).await
}

/// Profile plus up to `days` most recent prices. `None` if the symbol is unknown.
pub async fn stock_history(
    store: &dyn MarketStore,
    symbol: &str,
    days: u32,
) -> Result<Option<StockHistory>> {
    let Some(profile) = store.stock_profile(symbol).await? else {
        debug!(%symbol, "Unknown symbol");
        return Ok(None);
    };

    let prices = store.price_history(&profile.symbol, days).await?;

    Ok(Some(StockHistory {
        symbol: profile.symbol,
        name: profile.name,
        exchange: profile.exchange,
        sector: profile.sector,
        prices,
    }))
}

/// Market-wide counts and volume on the latest trading date.
pub async fn market_summary(store: &dyn MarketStore) -> Result<MarketSummary> {
    let date = store.latest_trading_date().await?;

    Ok(MarketSummary {
        total_stocks: store.stock_count().await?,
        total_volume: store.volume_on(date).await?,
        exchanges: store.exchange_breakdown(date).await?,
        sectors: store.sector_breakdown().await?,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::{Layer, PricePoint, StockRecord};
    use store::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn stock(symbol: &str, exchange: &str, sector: &str) -> StockRecord {
        StockRecord {
            symbol: symbol.to_string(),
            name: format!("{symbol} JSC"),
            exchange: exchange.to_string(),
            industry: "Steel".to_string(),
            sector: sector.to_string(),
            layer: Layer::Midcap,
            listing_date: NaiveDate::from_ymd_opt(2019, 1, 2).unwrap(),
            outstanding_shares: 500_000,
            market_cap: 15_000_000_000,
        }
    }

    fn price(symbol: &str, date: NaiveDate, close: f64, volume: i64) -> PricePoint {
        PricePoint {
            symbol: symbol.to_string(),
            date,
            open: close,
            high: close + 0.2,
            low: close - 0.2,
            close,
            volume,
            adjusted_close: close,
        }
    }

    async fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .load(
                vec![
                    stock("HPG", "HOSE", "THEP"),
                    stock("HSG", "HOSE", "THEP"),
                    stock("POM", "HNX", "THEP"),
                    stock("PC1", "HNX", "DIEN"),
                ],
                vec![
                    price("HPG", day(4), 27.0, 1_500_000),
                    price("HPG", day(5), 27.5, 1_800_000),
                    price("HPG", day(6), 27.1, 2_100_000),
                    price("HSG", day(6), 21.0, 1_200_000),
                    price("POM", day(5), 6.0, 1_000_000),
                ],
            )
            .await;
        store
    }

    #[tokio::test]
    async fn history_returns_newest_first() {
        let store = store().await;
        let history = stock_history(&store, "HPG", 2).await.unwrap().unwrap();
        assert_eq!(history.symbol, "HPG");
        assert_eq!(history.exchange, "HOSE");
        assert_eq!(history.sector, "THEP");
        let dates: Vec<NaiveDate> = history.prices.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(6), day(5)]);
    }

    #[tokio::test]
    async fn history_of_unknown_symbol_is_none() {
        let store = store().await;
        assert!(stock_history(&store, "XYZ", 30).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn history_of_unpriced_symbol_is_empty() {
        let store = store().await;
        let history = stock_history(&store, "PC1", 30).await.unwrap().unwrap();
        assert!(history.prices.is_empty());
    }

    #[tokio::test]
    async fn latest_prices_skip_unpriced_stocks() {
        let store = store().await;
        let rows = latest_prices(&store, 50).await.unwrap();
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["HPG", "HSG", "POM"]);
        assert_eq!(rows[0].latest_date, day(6));
        assert_eq!(rows[2].latest_date, day(5));
    }

    #[tokio::test]
    async fn summary_uses_latest_trading_date() {
        let store = store().await;
        let summary = market_summary(&store).await.unwrap();
        assert_eq!(summary.date, Some(day(6)));
        assert_eq!(summary.total_stocks, 4);
        assert_eq!(summary.total_volume, 3_300_000);
        assert_eq!(summary.exchanges.len(), 2);
        assert_eq!(summary.exchanges[0].exchange, "HNX");
        assert_eq!(summary.exchanges[0].total_volume, 0);
        assert_eq!(summary.exchanges[1].exchange, "HOSE");
        assert_eq!(summary.exchanges[1].total_volume, 3_300_000);
        assert_eq!(summary.sectors[0].sector, "THEP");
        assert_eq!(summary.sectors[0].stock_count, 3);
    }

    #[tokio::test]
    async fn summary_of_empty_market() {
        let store = MemoryStore::new();
        let summary = market_summary(&store).await.unwrap();
        assert_eq!(summary.date, None);
        assert_eq!(summary.total_stocks, 0);
        assert_eq!(summary.total_volume, 0);
        assert!(summary.exchanges.is_empty());
        assert!(summary.sectors.is_empty());
    }
}
