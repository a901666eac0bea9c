//! Remote station data.
//!
//! [`StationSource`] is the contract the rest of the crate fetches through:
//! regions, the stations of a locality, stations around a point, and one
//! station's detail and price history. [`HttpStationSource`] talks to the
//! public price API, [`CachedStationSource`] keeps recent lists in memory,
//! and [`MockStationSource`] serves fixed data for tests and offline runs.
//!
//! Sources never retry; callers decide whether to try again.

mod cache;
mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{Locality, NearbyStation, PriceHistory, Province, Station, StationId};

pub use cache::{CacheConfig, CachedStationSource};
pub use client::{DEFAULT_BASE_URL, HttpStationSource, SourceConfig};
pub use convert::{ConversionError, convert_nearby, convert_station, convert_stations};
pub use error::SourceError;
pub use mock::MockStationSource;
pub use types::{HistoricDto, LocalityDto, ProvinceDto, StationDto};

/// Default search radius for proximity queries, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Default number of results per proximity request.
pub const DEFAULT_NEARBY_LIMIT: u32 = 30;

/// Parameters of a proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    /// Server-side page, from 1.
    pub page: u32,
    pub limit: u32,
}

impl NearbyQuery {
    /// Query around a point with the default radius and limit.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: DEFAULT_RADIUS_KM,
            page: 1,
            limit: DEFAULT_NEARBY_LIMIT,
        }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit;
        self
    }
}

/// A provider of station data.
pub trait StationSource: Send + Sync {
    /// All provinces.
    fn provinces(&self) -> impl Future<Output = Result<Vec<Province>, SourceError>> + Send;

    /// Localities of one province.
    fn localities(
        &self,
        province_id: u32,
    ) -> impl Future<Output = Result<Vec<Locality>, SourceError>> + Send;

    /// Every station in a locality.
    fn stations(
        &self,
        locality_id: u32,
    ) -> impl Future<Output = Result<Vec<Station>, SourceError>> + Send;

    /// Stations within a radius of a point.
    fn nearest(
        &self,
        query: NearbyQuery,
    ) -> impl Future<Output = Result<Vec<NearbyStation>, SourceError>> + Send;

    /// One station, including its regional averages.
    fn detail(&self, id: StationId) -> impl Future<Output = Result<Station, SourceError>> + Send;

    /// One station's prices between two dates, inclusive.
    fn history(
        &self,
        id: StationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<PriceHistory, SourceError>> + Send;

    /// Forget any stored copy of a locality's station list, so the next
    /// `stations` call reaches the backend. Sources without a cache do nothing.
    fn invalidate_locality(&self, locality_id: u32) -> impl Future<Output = ()> + Send {
        let _ = locality_id;
        async {}
    }
}
