use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::ApiError;

pub const DEFAULT_LIMIT: u32 = 50;
pub const LIMIT_RANGE: RangeInclusive<u32> = 1..=100;
pub const DEFAULT_DAYS: u32 = 30;
pub const DAYS_RANGE: RangeInclusive<u32> = 1..=365;

// Raw strings so malformed values surface as our own 400 body rather than
// axum's plain-text query rejection.

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DaysQuery {
    pub days: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Integer query value within `range`.
///
/// Only the leading integer of the value is read, so `12abc` is 12. A value
/// that is absent, has no leading digits, or reads as zero falls back to
/// `default`. Any other value outside `range` is rejected.
pub fn bounded(
    name: &str,
    raw: Option<&str>,
    default: u32,
    range: RangeInclusive<u32>,
) -> Result<u32, ApiError> {
    let n = match raw.and_then(leading_int) {
        None | Some(0) => return Ok(default),
        Some(n) => n,
    };
    match u32::try_from(n) {
        Ok(n) if range.contains(&n) => Ok(n),
        _ => Err(ApiError::BadRequest(format!(
            "{name} must be between {} and {}",
            range.start(),
            range.end()
        ))),
    }
}

/// Signed integer prefix after leading whitespace. Saturates on overflow.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Optional `YYYY-MM-DD` date. An empty value counts as absent.
pub fn trading_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    if !is_iso_date_shape(raw) {
        return Err(ApiError::BadRequest(
            "Date must be in YYYY-MM-DD format".to_string(),
        ));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("Date '{raw}' is not a valid calendar date")))
}

/// Non-blank path segment, trimmed.
pub fn required<'a>(name: &str, raw: &'a str) -> Result<&'a str, ApiError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("{name} is required")));
    }
    Ok(value)
}

// chrono alone accepts `2024-1-5`
fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_falls_back_to_default() {
        for raw in [None, Some(""), Some("0"), Some("abc"), Some("-0"), Some("  ")] {
            assert_eq!(bounded("Limit", raw, 50, LIMIT_RANGE).unwrap(), 50, "{raw:?}");
        }
    }

    #[test]
    fn bounded_reads_leading_integer() {
        assert_eq!(bounded("Limit", Some("1"), 50, LIMIT_RANGE).unwrap(), 1);
        assert_eq!(bounded("Limit", Some("100"), 50, LIMIT_RANGE).unwrap(), 100);
        assert_eq!(bounded("Limit", Some("12abc"), 50, LIMIT_RANGE).unwrap(), 12);
        assert_eq!(bounded("Limit", Some("2.5"), 50, LIMIT_RANGE).unwrap(), 2);
        assert_eq!(bounded("Limit", Some(" +7"), 50, LIMIT_RANGE).unwrap(), 7);
    }

    #[test]
    fn bounded_rejects_out_of_range() {
        for raw in ["101", "-5", "-1x", "99999999999999999999999"] {
            let err = bounded("Limit", Some(raw), 50, LIMIT_RANGE).unwrap_err();
            assert_eq!(err.to_string(), "Limit must be between 1 and 100", "{raw}");
        }
        assert!(bounded("Days", Some("366"), 30, DAYS_RANGE).is_err());
    }

    #[test]
    fn dates_must_be_padded_and_real() {
        assert_eq!(trading_date(None).unwrap(), None);
        assert_eq!(trading_date(Some("")).unwrap(), None);
        assert_eq!(
            trading_date(Some("2024-01-10")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10)
        );
        assert!(trading_date(Some("2024-1-10")).is_err());
        assert!(trading_date(Some("2024/01/10")).is_err());
        assert!(trading_date(Some("2024-02-30")).is_err());
        assert!(trading_date(Some("10-01-2024")).is_err());
    }

    #[test]
    fn required_rejects_blank() {
        assert_eq!(required("Sector", " thep ").unwrap(), "thep");
        assert!(required("Sector", "   ").is_err());
    }
}
