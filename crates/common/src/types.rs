use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Market-capitalization tier of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum Layer {
    Bluechip,
    Midcap,
    Penny,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Bluechip, Layer::Midcap, Layer::Penny];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Bluechip => "BLUECHIP",
            Layer::Midcap => "MIDCAP",
            Layer::Penny => "PENNY",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `BLUECHIP`, `MIDCAP`, `PENNY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLayer(pub String);

impl std::fmt::Display for UnknownLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown layer '{}'", self.0)
    }
}

impl std::error::Error for UnknownLayer {}

impl std::str::FromStr for Layer {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BLUECHIP" => Ok(Layer::Bluechip),
            "MIDCAP" => Ok(Layer::Midcap),
            "PENNY" => Ok(Layer::Penny),
            _ => Err(UnknownLayer(s.to_string())),
        }
    }
}

/// One traded instrument. Created at seed time, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StockRecord {
    pub symbol: String,
    pub name: String,
    /// HOSE, HNX or UPCOM.
    pub exchange: String,
    pub industry: String,
    /// Sector code, e.g. `NGANHANG`.
    pub sector: String,
    pub layer: Layer,
    pub listing_date: NaiveDate,
    pub outstanding_shares: i64,
    pub market_cap: i64,
}

/// One trading day's OHLCV observation. At most one per (symbol, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PricePoint {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub adjusted_close: f64,
}

/// Group of stocks a strength score is computed over.
///
/// Serializes as a single `layer` or `sector` field so it can be
/// flattened into [`CohortStrength`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cohort {
    Layer(Layer),
    Sector(String),
}

impl Cohort {
    /// Builds a sector cohort with the key normalized to uppercase.
    pub fn sector(sector: impl AsRef<str>) -> Self {
        Cohort::Sector(sector.as_ref().trim().to_uppercase())
    }

    /// Uppercased cohort key, as matched against `stocks.layer` / `stocks.sector`.
    pub fn key(&self) -> String {
        match self {
            Cohort::Layer(layer) => layer.as_str().to_string(),
            Cohort::Sector(sector) => sector.trim().to_uppercase(),
        }
    }

    /// Same cohort with its key in canonical form.
    pub fn normalized(&self) -> Self {
        match self {
            Cohort::Layer(layer) => Cohort::Layer(*layer),
            Cohort::Sector(sector) => Cohort::sector(sector),
        }
    }

    /// `"layer"` or `"sector"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Cohort::Layer(_) => "layer",
            Cohort::Sector(_) => "sector",
        }
    }
}

impl std::fmt::Display for Cohort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.key())
    }
}

/// A cohort member's close on the target date and on its previous trading day.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MemberCloses {
    pub symbol: String,
    pub current_close: f64,
    /// `None` when the symbol has no price before the target date.
    pub previous_close: Option<f64>,
}

/// Discrete label for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrengthStatus {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl std::fmt::Display for StrengthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthStatus::VeryStrong => write!(f, "VERY_STRONG"),
            StrengthStatus::Strong => write!(f, "STRONG"),
            StrengthStatus::Moderate => write!(f, "MODERATE"),
            StrengthStatus::Weak => write!(f, "WEAK"),
            StrengthStatus::VeryWeak => write!(f, "VERY_WEAK"),
        }
    }
}

/// Momentum snapshot of one cohort on one trading date. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortStrength {
    #[serde(flatten)]
    pub cohort: Cohort,
    pub strength: f64,
    pub avg_change: f64,
    pub ad_ratio: f64,
    pub total_stocks: usize,
    pub advancers: usize,
    pub decliners: usize,
    pub status: StrengthStatus,
}

// ─── Market read models ───────────────────────────────────────────────────────

/// A stock together with its most recent price row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StockWithPrice {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub sector: String,
    pub latest_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StockProfile {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub sector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HistoricalPrice {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub adjusted_close: f64,
}

/// Profile plus recent prices, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHistory {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub sector: String,
    pub prices: Vec<HistoricalPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExchangeBreakdown {
    pub exchange: String,
    pub stock_count: i64,
    pub total_volume: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SectorBreakdown {
    pub sector: String,
    pub stock_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub total_stocks: i64,
    pub total_volume: i64,
    pub exchanges: Vec<ExchangeBreakdown>,
    pub sectors: Vec<SectorBreakdown>,
    /// Latest trading date; absent when no prices are loaded.
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_parses_case_insensitively() {
        assert_eq!("bluechip".parse::<Layer>(), Ok(Layer::Bluechip));
        assert_eq!("MidCap".parse::<Layer>(), Ok(Layer::Midcap));
        assert_eq!(" PENNY ".parse::<Layer>(), Ok(Layer::Penny));
        assert!("LARGECAP".parse::<Layer>().is_err());
        assert!("".parse::<Layer>().is_err());
    }

    #[test]
    fn sector_cohort_key_is_uppercased() {
        let cohort = Cohort::sector("nganHang");
        assert_eq!(cohort.key(), "NGANHANG");
        assert_eq!(Cohort::Sector("bds".into()).key(), "BDS");
        assert_eq!(Cohort::Sector("bds".into()).normalized(), Cohort::Sector("BDS".into()));
    }

    #[test]
    fn cohort_strength_serializes_with_cohort_field() {
        let result = CohortStrength {
            cohort: Cohort::Layer(Layer::Midcap),
            strength: 1.6,
            avg_change: 1.0,
            ad_ratio: 0.75,
            total_stocks: 4,
            advancers: 3,
            decliners: 1,
            status: StrengthStatus::Strong,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["layer"], "MIDCAP");
        assert_eq!(value["avgChange"], 1.0);
        assert_eq!(value["adRatio"], 0.75);
        assert_eq!(value["totalStocks"], 4);
        assert_eq!(value["status"], "STRONG");
        assert!(value.get("cohort").is_none());

        let sector = CohortStrength {
            cohort: Cohort::sector("bds"),
            status: StrengthStatus::VeryWeak,
            ..result
        };
        let value = serde_json::to_value(&sector).unwrap();
        assert_eq!(value["sector"], "BDS");
        assert_eq!(value["status"], "VERY_WEAK");
    }
}
