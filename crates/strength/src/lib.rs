//! Layer and sector momentum scores.
//!
//! [`StrengthCalculator`] pulls close-price pairs for a cohort from a
//! [`common::MarketStore`] and blends average move with advance breadth;
//! [`classify`] maps the resulting score to a [`common::StrengthStatus`].

pub mod calculator;
pub mod status;

pub use calculator::{aggregate, percent_change, round2, CohortMetrics, StrengthCalculator};
pub use status::classify;
