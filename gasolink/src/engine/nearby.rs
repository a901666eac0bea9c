//! Ordering for proximity results.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::sort::{UnknownSortKey, compare_names};
use crate::domain::NearbyStation;

/// Order options for the nearby-stations grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NearbySortKey {
    #[default]
    DistanceAsc,
    DistanceDesc,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl NearbySortKey {
    pub const ALL: [NearbySortKey; 6] = [
        NearbySortKey::DistanceAsc,
        NearbySortKey::DistanceDesc,
        NearbySortKey::PriceAsc,
        NearbySortKey::PriceDesc,
        NearbySortKey::NameAsc,
        NearbySortKey::NameDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NearbySortKey::DistanceAsc => "distance-asc",
            NearbySortKey::DistanceDesc => "distance-desc",
            NearbySortKey::PriceAsc => "price-asc",
            NearbySortKey::PriceDesc => "price-desc",
            NearbySortKey::NameAsc => "name-asc",
            NearbySortKey::NameDesc => "name-desc",
        }
    }
}

impl FromStr for NearbySortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NearbySortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for NearbySortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare optional values, missing ones last in either direction.
fn missing_last(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort proximity results in place.
///
/// Price order uses each station's cheapest fuel. Stations without a
/// distance or without any price go last; ties fall back to name then id.
pub fn sort_nearby(stations: &mut [NearbyStation], key: NearbySortKey) {
    stations.sort_by(|a, b| {
        let primary = match key {
            NearbySortKey::DistanceAsc => missing_last(a.distance_km, b.distance_km, false),
            NearbySortKey::DistanceDesc => missing_last(a.distance_km, b.distance_km, true),
            NearbySortKey::PriceAsc | NearbySortKey::PriceDesc => missing_last(
                a.station.cheapest().map(|p| p.value()),
                b.station.cheapest().map(|p| p.value()),
                key == NearbySortKey::PriceDesc,
            ),
            NearbySortKey::NameAsc => compare_names(&a.station.name, &b.station.name),
            NearbySortKey::NameDesc => compare_names(&b.station.name, &a.station.name),
        };
        primary
            .then_with(|| compare_names(&a.station.name, &b.station.name))
            .then_with(|| a.station.id.cmp(&b.station.id))
    });
}
