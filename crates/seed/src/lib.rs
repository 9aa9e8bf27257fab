//! Deterministic sample data for the Vietnamese listings in [`catalogue`].
//!
//! Prices follow a bounded random walk per symbol over weekdays only and
//! are quoted in thousands of VND. The same seed always yields the same data.

pub mod catalogue;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use common::{Layer, PricePoint, StockRecord};

pub use catalogue::{industry_of, Listing, LISTINGS};

/// Largest daily move of the walk, as a fraction.
const DAILY_MOVE: f64 = 0.03;
/// Largest intraday excursion from the open, as a fraction.
const INTRADAY_RANGE: f64 = 0.02;
/// Assumed average share price used to derive outstanding shares.
const REFERENCE_PRICE: i64 = 30_000;
/// Longest window `generate` is meant to cover, in calendar days.
pub const MAX_DAYS: u32 = 3_650;

#[derive(Debug, Clone)]
pub struct SampleData {
    pub stocks: Vec<StockRecord>,
    pub prices: Vec<PricePoint>,
}

/// Generate stocks and `days` calendar days of prices ending at `end`.
/// Dates that would fall before [`NaiveDate::MIN`] are skipped.
pub fn generate(end: NaiveDate, days: u32, seed: u64) -> SampleData {
    let mut rng = StdRng::seed_from_u64(seed);

    let stocks: Vec<StockRecord> = LISTINGS
        .iter()
        .map(|listing| stock_record(listing, end, &mut rng))
        .collect();

    let mut prices = Vec::new();
    for listing in &LISTINGS {
        prices.extend(price_walk(listing, end, days, &mut rng));
    }

    debug!(stocks = stocks.len(), prices = prices.len(), seed, "Sample data generated");
    SampleData { stocks, prices }
}

fn market_cap(layer: Layer, rng: &mut StdRng) -> i64 {
    match layer {
        Layer::Bluechip => rng.gen_range(100_000_000_000..600_000_000_000),
        Layer::Midcap => rng.gen_range(10_000_000_000..100_000_000_000),
        Layer::Penny => rng.gen_range(1_000_000_000..10_000_000_000),
    }
}

fn base_price(layer: Layer, rng: &mut StdRng) -> f64 {
    let price: u32 = match layer {
        Layer::Bluechip => rng.gen_range(50_000..150_000),
        Layer::Midcap => rng.gen_range(10_000..50_000),
        Layer::Penny => rng.gen_range(1_000..10_000),
    };
    f64::from(price)
}

fn stock_record(listing: &Listing, end: NaiveDate, rng: &mut StdRng) -> StockRecord {
    let market_cap = market_cap(listing.layer, rng);
    let listed_days_ago = rng.gen_range(0..=5 * 365);

    StockRecord {
        symbol: listing.symbol.to_string(),
        name: listing.name.to_string(),
        exchange: listing.exchange.to_string(),
        industry: industry_of(listing.sector).to_string(),
        sector: listing.sector.to_string(),
        layer: listing.layer,
        listing_date: end.checked_sub_days(Days::new(listed_days_ago)).unwrap_or(end),
        outstanding_shares: market_cap / REFERENCE_PRICE,
        market_cap,
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn price_walk(listing: &Listing, end: NaiveDate, days: u32, rng: &mut StdRng) -> Vec<PricePoint> {
    let mut current = base_price(listing.layer, rng);
    let mut prices = Vec::new();

    for offset in (0..days).rev() {
        let Some(date) = end.checked_sub_days(Days::new(u64::from(offset))) else {
            continue;
        };
        if is_weekend(date) {
            continue;
        }

        let change = 1.0 + rng.gen_range(-DAILY_MOVE..DAILY_MOVE);
        current = (current * change).floor().max(1.0);

        let open = current;
        let high = (open * (1.0 + rng.gen::<f64>() * INTRADAY_RANGE)).floor();
        let low = (open * (1.0 - rng.gen::<f64>() * INTRADAY_RANGE)).floor();
        let close = (low + rng.gen::<f64>() * (high - low)).floor();
        let volume = 1_000_000 + rng.gen_range(0..2_000_000_i64);

        prices.push(PricePoint {
            symbol: listing.symbol.to_string(),
            date,
            open: open / 1000.0,
            high: high / 1000.0,
            low: low / 1000.0,
            close: close / 1000.0,
            volume,
            adjusted_close: close / 1000.0,
        });

        current = close.max(1.0);
    }

    prices
}
