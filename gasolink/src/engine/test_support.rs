//! Proptest strategies shared by the engine tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use super::filter::{FilterCriteria, PriceRange};
use crate::domain::{FuelKey, Price, Station};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

fn arb_fuel() -> impl Strategy<Value = FuelKey> {
    (0..FuelKey::ALL.len()).prop_map(|i| FuelKey::ALL[i])
}

/// Prices in thousandths, so equal prices actually occur.
fn arb_price() -> impl Strategy<Value = Price> {
    (800u32..2200).prop_map(|milli| Price::new(f64::from(milli / 10 * 10) / 1000.0).unwrap())
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-zÁÉáéñÑ ]{1,8}",
        prop::sample::select(vec!["Repsol", "repsol", "Cepsa", "BP", "Ñandú", "Ávila"])
            .prop_map(String::from),
    ]
}

type StationParts = (String, Vec<(FuelKey, Price)>, Option<i64>);

fn arb_station_parts() -> impl Strategy<Value = StationParts> {
    (
        arb_name(),
        prop::collection::vec((arb_fuel(), arb_price()), 0..5),
        prop::option::of(-5i64..72),
    )
}

/// Stations with unique ids.
pub fn arb_stations() -> impl Strategy<Value = Vec<Station>> {
    prop::collection::vec(arb_station_parts(), 0..24).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(i, (name, prices, age_hours))| {
                let mut station = Station::new(i as u64 + 1, name);
                for (fuel, price) in prices {
                    station = station.with_price(fuel, price);
                }
                if let Some(hours) = age_hours {
                    station = station.with_last_update(fixed_now() - Duration::hours(hours));
                }
                station
            })
            .collect()
    })
}

pub fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::collection::btree_set(arb_fuel(), 0..3),
        prop::option::of(80u32..160),
        prop::option::of(120u32..220),
        any::<bool>(),
    )
        .prop_map(|(fuels, min, max, recently_updated)| FilterCriteria {
            fuels,
            price_range: PriceRange::new(
                min.map(|c| f64::from(c) / 100.0),
                max.map(|c| f64::from(c) / 100.0),
            ),
            recently_updated,
        })
}
