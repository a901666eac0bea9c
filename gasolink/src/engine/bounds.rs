//! Price bounds for seeding a price-range control.

use crate::domain::Station;

/// Bounds used when the data set has no prices at all.
pub const FALLBACK_BOUNDS: PriceBounds = PriceBounds { min: 1.0, max: 3.0 };

/// Widening applied on each side when every price is the same.
pub const DEGENERATE_MARGIN: f64 = 0.5;

/// Observed price span of a data set, rounded outward to one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// Compute bounds over every price of every station.
///
/// `min` is floored and `max` ceiled to one decimal. The result always has
/// `min < max`.
pub fn price_bounds(stations: &[Station]) -> PriceBounds {
    let mut prices = stations
        .iter()
        .flat_map(|s| s.prices.values())
        .map(|p| p.value());

    let Some(first) = prices.next() else {
        return FALLBACK_BOUNDS;
    };
    let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

    let mut min = (min * 10.0).floor() / 10.0;
    let mut max = (max * 10.0).ceil() / 10.0;

    if min >= max {
        min = (min - DEGENERATE_MARGIN).max(0.0);
        max += DEGENERATE_MARGIN;
    }

    PriceBounds { min, max }
}
