//! Station records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::{FuelKey, Price};

/// Stable station identifier (`idEstacion`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A fuel station with its reported prices.
///
/// Only fuels with a numeric price appear in `prices`; fields that were
/// `null`, absent or unparseable in the source record are simply missing.
/// Records are replaced wholesale when the source is queried again.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,

    /// Display name; empty when the source omitted it.
    pub name: String,

    pub brand: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
    pub province: Option<String>,
    pub coordinates: Option<Coordinates>,

    /// When the prices were last reported. `None` if missing or unreadable.
    pub last_update: Option<DateTime<Utc>>,

    /// Current price per fuel.
    pub prices: BTreeMap<FuelKey, Price>,

    /// Regional average per fuel, for comparison display only.
    pub averages: BTreeMap<FuelKey, Price>,
}

impl Station {
    /// Create a station with no prices or optional details.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: StationId(id),
            name: name.into(),
            brand: None,
            address: None,
            hours: None,
            postal_code: None,
            locality: None,
            province: None,
            coordinates: None,
            last_update: None,
            prices: BTreeMap::new(),
            averages: BTreeMap::new(),
        }
    }

    /// Set a fuel price.
    pub fn with_price(mut self, fuel: FuelKey, price: Price) -> Self {
        self.prices.insert(fuel, price);
        self
    }

    /// Set a fuel's regional average.
    pub fn with_average(mut self, fuel: FuelKey, average: Price) -> Self {
        self.averages.insert(fuel, average);
        self
    }

    /// Set the last update instant.
    pub fn with_last_update(mut self, at: DateTime<Utc>) -> Self {
        self.last_update = Some(at);
        self
    }

    /// Price of one fuel, if reported.
    pub fn price(&self, fuel: FuelKey) -> Option<Price> {
        self.prices.get(&fuel).copied()
    }

    /// All of this station's prices, cheapest first.
    pub fn sorted_prices(&self) -> Vec<Price> {
        let mut prices: Vec<Price> = self.prices.values().copied().collect();
        prices.sort_unstable();
        prices
    }

    /// The cheapest fuel this station sells.
    pub fn cheapest(&self) -> Option<Price> {
        self.prices.values().copied().min()
    }

    /// How this station's price compares with the regional average.
    pub fn compare_to_average(&self, fuel: FuelKey) -> Option<PriceComparison> {
        let price = self.price(fuel)?;
        let average = self.averages.get(&fuel)?;
        Some(match price.cmp(average) {
            std::cmp::Ordering::Less => PriceComparison::BelowAverage,
            std::cmp::Ordering::Equal => PriceComparison::AtAverage,
            std::cmp::Ordering::Greater => PriceComparison::AboveAverage,
        })
    }

    /// Hours elapsed between the last update and `now`.
    ///
    /// Negative when the record claims a future update.
    pub fn hours_since_update(&self, now: DateTime<Utc>) -> Option<f64> {
        let at = self.last_update?;
        Some((now - at).num_milliseconds() as f64 / 3_600_000.0)
    }
}

/// A station's price relative to the regional average for that fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceComparison {
    BelowAverage,
    AtAverage,
    AboveAverage,
}

/// A station returned by a proximity query.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub station: Station,

    /// Distance from the query point, in kilometres.
    pub distance_km: Option<f64>,
}

/// Parse a `lastUpdate` timestamp.
///
/// Accepts RFC 3339 and offset-less ISO 8601 forms (with `T` or a space,
/// with or without fractional seconds). Offset-less values are read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    #[test]
    fn sorted_prices_cheapest_first() {
        let station = Station::new(1, "Repsol")
            .with_price(FuelKey::Diesel, price("1.40"))
            .with_price(FuelKey::Gasolina95, price("1.55"))
            .with_price(FuelKey::Glp, price("0.95"));

        let prices: Vec<f64> = station.sorted_prices().into_iter().map(Price::value).collect();
        assert_eq!(prices, vec![0.95, 1.40, 1.55]);
        assert_eq!(station.cheapest(), Some(price("0.95")));
    }

    #[test]
    fn no_prices() {
        let station = Station::new(1, "Empty");
        assert!(station.sorted_prices().is_empty());
        assert!(station.cheapest().is_none());
        assert!(station.price(FuelKey::Diesel).is_none());
    }

    #[test]
    fn compare_to_average() {
        let station = Station::new(1, "Cepsa")
            .with_price(FuelKey::Diesel, price("1.40"))
            .with_average(FuelKey::Diesel, price("1.45"))
            .with_price(FuelKey::Gasolina95, price("1.60"))
            .with_average(FuelKey::Gasolina95, price("1.60"))
            .with_price(FuelKey::Gasolina98, price("1.80"))
            .with_average(FuelKey::Gasolina98, price("1.70"))
            .with_price(FuelKey::Glp, price("0.90"));

        assert_eq!(
            station.compare_to_average(FuelKey::Diesel),
            Some(PriceComparison::BelowAverage)
        );
        assert_eq!(
            station.compare_to_average(FuelKey::Gasolina95),
            Some(PriceComparison::AtAverage)
        );
        assert_eq!(
            station.compare_to_average(FuelKey::Gasolina98),
            Some(PriceComparison::AboveAverage)
        );
        assert_eq!(station.compare_to_average(FuelKey::Glp), None);
        assert_eq!(station.compare_to_average(FuelKey::E85), None);
    }

    #[test]
    fn hours_since_update() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
        let station = Station::new(1, "BP").with_last_update(now - chrono::Duration::minutes(90));
        assert_eq!(station.hours_since_update(now), Some(1.5));

        assert_eq!(Station::new(2, "Shell").hours_since_update(now), None);
    }

    #[test]
    fn parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 2, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-02T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-02T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-02T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-02 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-02T10:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-02T10:30"), Some(expected));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2025-13-02T10:30:00"), None);
    }

    #[test]
    fn station_id_display() {
        assert_eq!(StationId(4521).to_string(), "4521");
    }
}
