//! Domain types for the station directory.
//!
//! Wire records are converted into these types once, at the source
//! boundary. Prices are parsed there too, so everything downstream works
//! with validated numbers and never re-parses strings.

mod fuel;
mod history;
pub(crate) mod lenient;
mod price;
mod region;
mod station;

pub use fuel::{FuelKey, UnknownFuelKey, available_fuel_labels};
pub use history::{DailyPrice, HistoryEntry, Period, PriceHistory, fuel_type_name};
pub use price::Price;
pub use region::{Locality, Province};
pub use station::{
    Coordinates, NearbyStation, PriceComparison, Station, StationId, parse_timestamp,
};
