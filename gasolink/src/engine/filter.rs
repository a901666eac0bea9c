//! Station filtering.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::{FuelKey, Price, Station};

/// How old a station's prices may be and still count as recently updated.
pub const RECENT_UPDATE_HOURS: f64 = 24.0;

/// Inclusive price band; an unset bound is open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Whether either bound is set.
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, price: Price) -> bool {
        price.within(self.min, self.max)
    }
}

/// User-chosen station filters.
///
/// An empty fuel set means "any fuel": the price range then applies across
/// every fuel a station sells instead of only the selected ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub fuels: BTreeSet<FuelKey>,
    pub price_range: PriceRange,
    pub recently_updated: bool,
}

impl FilterCriteria {
    /// Whether any filter is active.
    pub fn is_active(&self) -> bool {
        !self.fuels.is_empty() || self.price_range.is_set() || self.recently_updated
    }

    /// Number of individual active filters, as shown on a filter badge.
    pub fn active_filter_count(&self) -> usize {
        self.fuels.len()
            + usize::from(self.price_range.min.is_some())
            + usize::from(self.price_range.max.is_some())
            + usize::from(self.recently_updated)
    }

    /// Whether `station` passes every active filter at instant `now`.
    pub fn matches(&self, station: &Station, now: DateTime<Utc>) -> bool {
        if !self.fuels.is_empty() {
            // The selected fuel itself must be in range; other fuels don't count
            let has_selected = self.fuels.iter().any(|fuel| {
                station
                    .price(*fuel)
                    .is_some_and(|p| self.price_range.contains(p))
            });
            if !has_selected {
                return false;
            }
        } else if self.price_range.is_set() {
            let any_in_range = station
                .prices
                .values()
                .any(|p| self.price_range.contains(*p));
            if !any_in_range {
                return false;
            }
        }

        if self.recently_updated {
            // Missing timestamps are treated as infinitely stale
            let fresh = station
                .hours_since_update(now)
                .is_some_and(|hours| hours <= RECENT_UPDATE_HOURS);
            if !fresh {
                return false;
            }
        }

        true
    }
}

/// Stations passing `criteria`, in their original order.
pub fn filter_stations<'a>(
    stations: &'a [Station],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a Station> {
    stations
        .iter()
        .filter(|s| criteria.matches(s, now))
        .collect()
}
