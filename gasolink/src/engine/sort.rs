//! Station ordering.
//!
//! Orders stations by name or by price. Price ordering compares each
//! station's own prices cheapest-first, position by position, so a station
//! whose two cheapest fuels are both low ranks ahead of one with a single
//! cheap fuel and expensive others.
//!
//! Stations reporting no prices at all rank last under both price
//! directions, and every ordering falls back to name then id, which makes
//! the result independent of input order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::{Price, Station};

/// Error returned when parsing an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option: {0}")]
pub struct UnknownSortKey(pub String);

/// Requested station order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    /// Menu label for this option.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Nombre (A-Z)",
            SortKey::NameDesc => "Nombre (Z-A)",
            SortKey::PriceAsc => "Precio (menor a mayor)",
            SortKey::PriceDesc => "Precio (mayor a menor)",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fold a name for locale-aware comparison.
///
/// Case and the common Latin accents are ignored; `ñ` is kept distinct and
/// sorts right after `n`.
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => key.push('a'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'í' | 'ì' | 'î' | 'ï' => key.push('i'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => key.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => key.push('u'),
            'ç' => key.push('c'),
            'ñ' => {
                key.push('n');
                key.push('\u{7f}');
            }
            other => key.push(other),
        }
    }
    key
}

/// Compare two names: folded form first, then the raw text.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Compare cheapest-first price lists position by position.
///
/// A list that runs out is padded with infinity. Empty lists always sort
/// after non-empty ones, regardless of direction.
pub fn compare_prices(a: &[Price], b: &[Price], descending: bool) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).map_or(f64::INFINITY, |p| p.value());
        let y = b.get(i).map_or(f64::INFINITY, |p| p.value());
        match x.total_cmp(&y) {
            Ordering::Equal => continue,
            ord if descending => return ord.reverse(),
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// A station with its sort keys computed once.
struct Keyed<'a> {
    station: &'a Station,
    name: String,
    prices: Vec<Price>,
}

impl<'a> Keyed<'a> {
    fn new(station: &'a Station) -> Self {
        Self {
            station,
            name: collation_key(&station.name),
            prices: station.sorted_prices(),
        }
    }

    fn by_name(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.station.name.cmp(&other.station.name))
    }

    fn compare(&self, other: &Self, key: SortKey) -> Ordering {
        let primary = match key {
            SortKey::NameAsc => self.by_name(other),
            SortKey::NameDesc => other.by_name(self),
            SortKey::PriceAsc => compare_prices(&self.prices, &other.prices, false),
            SortKey::PriceDesc => compare_prices(&self.prices, &other.prices, true),
        };
        primary
            .then_with(|| self.by_name(other))
            .then_with(|| self.station.id.cmp(&other.station.id))
    }
}

/// Compare two stations under `key`.
pub fn compare_stations(a: &Station, b: &Station, key: SortKey) -> Ordering {
    Keyed::new(a).compare(&Keyed::new(b), key)
}

/// Sort stations in place under `key`.
pub fn sort_stations(stations: &mut Vec<&Station>, key: SortKey) {
    let mut keyed: Vec<Keyed<'_>> = stations.iter().map(|s| Keyed::new(s)).collect();
    keyed.sort_by(|a, b| a.compare(b, key));
    *stations = keyed.into_iter().map(|k| k.station).collect();
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::engine::test_support::arb_stations;
    use proptest::prelude::*;

    fn arb_key() -> impl Strategy<Value = SortKey> {
        prop::sample::select(SortKey::ALL.to_vec())
    }

    proptest! {
        /// The comparator is transitive
        #[test]
        fn comparator_is_transitive(stations in arb_stations(), key in arb_key()) {
            for a in &stations {
                for b in &stations {
                    for c in &stations {
                        if compare_stations(a, b, key) != Ordering::Greater
                            && compare_stations(b, c, key) != Ordering::Greater
                        {
                            prop_assert_ne!(compare_stations(a, c, key), Ordering::Greater);
                        }
                    }
                }
            }
        }

        /// The comparator is antisymmetric and only equal on the same station
        #[test]
        fn comparator_is_antisymmetric(stations in arb_stations(), key in arb_key()) {
            for a in &stations {
                for b in &stations {
                    let ab = compare_stations(a, b, key);
                    prop_assert_eq!(ab, compare_stations(b, a, key).reverse());
                    prop_assert_eq!(ab == Ordering::Equal, a.id == b.id);
                }
            }
        }

        /// Sorting a shuffled input gives the same order
        #[test]
        fn sort_ignores_input_order(stations in arb_stations(), key in arb_key()) {
            let mut forward: Vec<&Station> = stations.iter().collect();
            let mut backward: Vec<&Station> = stations.iter().rev().collect();
            sort_stations(&mut forward, key);
            sort_stations(&mut backward, key);
            let f: Vec<_> = forward.iter().map(|s| s.id).collect();
            let b: Vec<_> = backward.iter().map(|s| s.id).collect();
            prop_assert_eq!(f, b);
        }
    }
}
