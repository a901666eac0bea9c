//! Fuel prices.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

/// A fuel price in currency units per litre.
///
/// Always finite and non-negative, so prices have a total order.
///
/// # Examples
///
/// ```
/// use gasolink::domain::Price;
///
/// assert_eq!(Price::parse("1.459").unwrap().value(), 1.459);
/// assert_eq!(Price::parse("1,459").unwrap().value(), 1.459);
///
/// // Not reported, or not numeric
/// assert!(Price::parse("null").is_none());
/// assert!(Price::parse("").is_none());
/// assert!(Price::parse("n/a").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// Wrap a raw value, rejecting NaN, infinities and negatives.
    pub fn new(value: f64) -> Option<Self> {
        // -0.0 is stored as 0.0 so equality and ordering agree.
        (value.is_finite() && value >= 0.0).then_some(Self(value.abs()))
    }

    /// Parse a price as it appears in station records.
    ///
    /// Accepts `.` or `,` as decimal separator and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            return None;
        }
        let normalized = trimmed.replace(',', ".");
        normalized.parse::<f64>().ok().and_then(Self::new)
    }

    /// Read a price from a JSON field value (string or number).
    ///
    /// `null` and every other JSON type yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => n.as_f64().and_then(Self::new),
            _ => None,
        }
    }

    /// The raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this price lies inside `[min, max]`; an unset bound is open.
    pub fn within(self, min: Option<f64>, max: Option<f64>) -> bool {
        min.is_none_or(|min| self.0 >= min) && max.is_none_or(|max| self.0 <= max)
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}
