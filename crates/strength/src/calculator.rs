use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use common::{Cohort, CohortStrength, Layer, MarketStore, MemberCloses, Result};

use crate::status::classify;

/// Weight of the average percentage move in the composite score.
const AVG_CHANGE_WEIGHT: f64 = 0.6;
/// Weight of the breadth term.
const BREADTH_WEIGHT: f64 = 0.4;
/// Scales `adRatio - 0.5` into the same range as percentage moves.
const BREADTH_SCALE: f64 = 10.0;

/// Unrounded cohort aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortMetrics {
    pub total_stocks: usize,
    pub advancers: usize,
    pub decliners: usize,
    pub avg_change: f64,
    pub ad_ratio: f64,
    pub strength: f64,
}

/// Day-over-day close change in percent. Zero when there is no usable
/// previous close.
pub fn percent_change(current_close: f64, previous_close: Option<f64>) -> f64 {
    match previous_close {
        Some(prev) if prev > 0.0 => (current_close - prev) / prev * 100.0,
        _ => 0.0,
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregate member closes into cohort metrics. Returns `None` for an
/// empty member set.
///
/// Members with a change of exactly zero count toward neither advancers
/// nor decliners but still weigh on the average.
pub fn aggregate(members: &[MemberCloses]) -> Option<CohortMetrics> {
    if members.is_empty() {
        return None;
    }

    let changes: Vec<f64> = members
        .iter()
        .map(|m| percent_change(m.current_close, m.previous_close))
        .collect();

    let total_stocks = changes.len();
    let advancers = changes.iter().filter(|&&c| c > 0.0).count();
    let decliners = changes.iter().filter(|&&c| c < 0.0).count();
    let avg_change = changes.iter().sum::<f64>() / total_stocks as f64;
    let ad_ratio = advancers as f64 / total_stocks as f64;
    let strength =
        avg_change * AVG_CHANGE_WEIGHT + (ad_ratio - 0.5) * BREADTH_SCALE * BREADTH_WEIGHT;

    Some(CohortMetrics {
        total_stocks,
        advancers,
        decliners,
        avg_change,
        ad_ratio,
        strength,
    })
}

/// Computes [`CohortStrength`] snapshots on demand. Holds no state besides
/// the store handle, so clones are cheap and calls are independent.
#[derive(Clone)]
pub struct StrengthCalculator {
    store: Arc<dyn MarketStore>,
}

impl StrengthCalculator {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    pub async fn layer_strength(
        &self,
        layer: Layer,
        date: Option<NaiveDate>,
    ) -> Result<Option<CohortStrength>> {
        self.cohort_strength(&Cohort::Layer(layer), date).await
    }

    /// Any sector string is accepted; an unknown sector and a known sector
    /// without prices on the date both come back as `None`.
    pub async fn sector_strength(
        &self,
        sector: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<CohortStrength>> {
        self.cohort_strength(&Cohort::sector(sector), date).await
    }

    /// Snapshot of `cohort` on `date`, or on the latest trading date when
    /// `date` is `None`. `Ok(None)` when no date can be resolved or no member
    /// has a price on it.
    pub async fn cohort_strength(
        &self,
        cohort: &Cohort,
        date: Option<NaiveDate>,
    ) -> Result<Option<CohortStrength>> {
        let cohort = cohort.normalized();

        let target_date = match date {
            Some(d) => d,
            None => match self.store.latest_trading_date().await? {
                Some(d) => d,
                None => {
                    debug!(%cohort, "No price data loaded; cannot resolve trading date");
                    return Ok(None);
                }
            },
        };

        let members = self.store.cohort_closes(&cohort, target_date).await?;
        let Some(metrics) = aggregate(&members) else {
            debug!(%cohort, date = %target_date, "No cohort members priced on date");
            return Ok(None);
        };

        let status = classify(metrics.strength);
        info!(
            %cohort,
            date = %target_date,
            members = metrics.total_stocks,
            strength = metrics.strength,
            %status,
            "Cohort strength computed"
        );

        Ok(Some(CohortStrength {
            cohort,
            strength: round2(metrics.strength),
            avg_change: round2(metrics.avg_change),
            ad_ratio: round2(metrics.ad_ratio),
            total_stocks: metrics.total_stocks,
            advancers: metrics.advancers,
            decliners: metrics.decliners,
            status,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{PricePoint, StockRecord, StrengthStatus};
    use store::MemoryStore;

    fn member(symbol: &str, current: f64, previous: Option<f64>) -> MemberCloses {
        MemberCloses {
            symbol: symbol.to_string(),
            current_close: current,
            previous_close: previous,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn stock(symbol: &str, sector: &str, layer: Layer) -> StockRecord {
        StockRecord {
            symbol: symbol.to_string(),
            name: format!("{symbol} Corp"),
            exchange: "HOSE".to_string(),
            industry: "Banking".to_string(),
            sector: sector.to_string(),
            layer,
            listing_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            outstanding_shares: 1_000_000,
            market_cap: 30_000_000_000,
        }
    }

    fn price(symbol: &str, date: NaiveDate, close: f64) -> PricePoint {
        PricePoint {
            symbol: symbol.to_string(),
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000_000,
            adjusted_close: close,
        }
    }

    #[test]
    fn percent_change_guards_missing_and_non_positive_previous() {
        assert_eq!(percent_change(110.0, None), 0.0);
        assert_eq!(percent_change(110.0, Some(0.0)), 0.0);
        assert_eq!(percent_change(110.0, Some(-5.0)), 0.0);
        assert!((percent_change(110.0, Some(100.0)) - 10.0).abs() < 1e-9);
        assert!((percent_change(95.0, Some(100.0)) + 5.0).abs() < 1e-9);
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.666_666_6), 1.67);
        assert_eq!(round2(-1.666_666_6), -1.67);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(1.6000000000000001), 1.6);
    }

    #[test]
    fn aggregate_empty_is_none() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn aggregate_four_member_example() {
        // +2%, +2%, -1%, +1%
        let members = vec![
            member("AAA", 102.0, Some(100.0)),
            member("BBB", 51.0, Some(50.0)),
            member("CCC", 99.0, Some(100.0)),
            member("DDD", 20.2, Some(20.0)),
        ];
        let m = aggregate(&members).unwrap();
        assert_eq!(m.total_stocks, 4);
        assert_eq!(m.advancers, 3);
        assert_eq!(m.decliners, 1);
        assert_eq!(round2(m.avg_change), 1.0);
        assert_eq!(m.ad_ratio, 0.75);
        assert_eq!(round2(m.strength), 1.6);
        assert_eq!(classify(m.strength), StrengthStatus::Strong);
    }

    #[test]
    fn aggregate_without_usable_previous_is_minus_two() {
        let members = vec![
            member("AAA", 10.0, None),
            member("BBB", 10.0, Some(0.0)),
            member("CCC", 10.0, None),
        ];
        let m = aggregate(&members).unwrap();
        assert_eq!(m.avg_change, 0.0);
        assert_eq!(m.ad_ratio, 0.0);
        assert_eq!(m.advancers, 0);
        assert_eq!(m.decliners, 0);
        assert_eq!(m.strength, -2.0);
        assert_eq!(classify(m.strength), StrengthStatus::Weak);
    }

    #[test]
    fn aggregate_ties_count_toward_neither_side() {
        let members = vec![
            member("AAA", 100.0, Some(100.0)),
            member("BBB", 105.0, Some(100.0)),
            member("CCC", 95.0, Some(100.0)),
        ];
        let m = aggregate(&members).unwrap();
        assert_eq!(m.advancers, 1);
        assert_eq!(m.decliners, 1);
        assert_eq!(m.total_stocks, 3);
        assert!(m.avg_change.abs() < 1e-9);
    }

    #[test]
    fn aggregate_avg_change_rounds_to_two_places() {
        // +5%, 0%, 0% -> 1.6666…
        let members = vec![
            member("AAA", 105.0, Some(100.0)),
            member("BBB", 100.0, Some(100.0)),
            member("CCC", 100.0, None),
        ];
        let m = aggregate(&members).unwrap();
        assert_eq!(round2(m.avg_change), 1.67);
        assert_eq!(round2(m.ad_ratio), 0.33);
    }

    async fn banking_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .load(
                vec![
                    stock("VCB", "NGANHANG", Layer::Bluechip),
                    stock("BID", "NGANHANG", Layer::Bluechip),
                    stock("ACB", "NGANHANG", Layer::Midcap),
                    stock("VHM", "BDS", Layer::Bluechip),
                    stock("NEW", "NGANHANG", Layer::Bluechip),
                ],
                vec![
                    price("VCB", day(8), 100.0),
                    price("VCB", day(9), 102.0),
                    price("VCB", day(10), 104.04),
                    price("BID", day(9), 50.0),
                    price("BID", day(10), 49.0),
                    price("ACB", day(9), 20.0),
                    price("ACB", day(10), 21.0),
                    price("VHM", day(5), 40.0),
                    price("VHM", day(10), 44.0),
                    // listed on the latest date only
                    price("NEW", day(10), 10.0),
                ],
            )
            .await;
        store
    }

    #[tokio::test]
    async fn layer_strength_defaults_to_latest_date() {
        let calc = StrengthCalculator::new(Arc::new(banking_store().await));
        let result = calc.layer_strength(Layer::Bluechip, None).await.unwrap().unwrap();

        // VCB +2%, BID -2%, VHM +10% (previous is day 5), NEW 0% (no prior row)
        assert_eq!(result.cohort, Cohort::Layer(Layer::Bluechip));
        assert_eq!(result.total_stocks, 4);
        assert_eq!(result.advancers, 2);
        assert_eq!(result.decliners, 1);
        assert_eq!(result.avg_change, 2.5);
        assert_eq!(result.ad_ratio, 0.5);
        assert_eq!(result.strength, 1.5);
        assert_eq!(result.status, StrengthStatus::Strong);
    }

    #[tokio::test]
    async fn sector_strength_is_case_insensitive_and_uppercases_key() {
        let calc = StrengthCalculator::new(Arc::new(banking_store().await));
        let result = calc.sector_strength("nganhang", Some(day(9))).await.unwrap().unwrap();

        // Day 9: VCB +2%, BID and ACB have no earlier rows
        assert_eq!(result.cohort, Cohort::Sector("NGANHANG".into()));
        assert_eq!(result.total_stocks, 3);
        assert_eq!(result.advancers, 1);
        assert_eq!(result.decliners, 0);
        assert_eq!(result.avg_change, 0.67);
        assert_eq!(result.ad_ratio, 0.33);
        // 0.6667 * 0.6 + (0.3333 - 0.5) * 4 = 0.4 - 0.6667
        assert_eq!(result.strength, -0.27);
        assert_eq!(result.status, StrengthStatus::Moderate);
    }

    #[tokio::test]
    async fn unknown_sector_and_unpriced_date_are_not_found() {
        let calc = StrengthCalculator::new(Arc::new(banking_store().await));
        assert!(calc.sector_strength("THEP", None).await.unwrap().is_none());
        assert!(calc.layer_strength(Layer::Penny, None).await.unwrap().is_none());
        assert!(calc
            .layer_strength(Layer::Bluechip, Some(day(20)))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn empty_price_table_is_not_found() {
        let store = MemoryStore::new();
        store
            .load(vec![stock("VCB", "NGANHANG", Layer::Bluechip)], vec![])
            .await;
        let calc = StrengthCalculator::new(Arc::new(store));
        assert!(calc.layer_strength(Layer::Bluechip, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let calc = StrengthCalculator::new(Arc::new(banking_store().await));
        let first = calc.layer_strength(Layer::Bluechip, None).await.unwrap();
        let second = calc.layer_strength(Layer::Bluechip, None).await.unwrap();
        assert_eq!(first, second);
    }
}
