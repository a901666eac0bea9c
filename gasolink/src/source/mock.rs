//! Mock station source for testing without API access.
//!
//! Serves fixed provinces, localities, station lists and price histories
//! from memory. Data can be built up in code or loaded from a JSON file
//! shaped like the API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::{
    Coordinates, Locality, NearbyStation, PriceHistory, Province, Station, StationId,
};

use super::convert::{convert_history, convert_locality, convert_province, convert_stations};
use super::error::SourceError;
use super::types::{HistoricDto, LocalityDto, ProvinceDto};
use super::{NearbyQuery, StationSource};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Layout of an offline data file.
///
/// ```json
/// {
///   "provinces": [{"idProvincia": 28, "nombreProvincia": "Madrid"}],
///   "localities": [{"idMunicipio": 4354, "nombreMunicipio": "Alcalá", "idProvincia": 28}],
///   "stations": {"4354": [{"idEstacion": 1, "nombreEstacion": "Repsol", "Diesel": "1.459"}]},
///   "history": {"1": {"estacionId": 1, "periodo": {"inicio": "2025-01-01", "fin": "2025-06-01"}, "data": []}}
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MockFile {
    provinces: Vec<ProvinceDto>,
    localities: Vec<LocalityDto>,
    stations: HashMap<u32, Vec<Value>>,
    history: HashMap<u64, HistoricDto>,
}

#[derive(Debug, Default)]
struct MockData {
    provinces: Vec<Province>,
    localities: Vec<Locality>,
    stations: HashMap<u32, Vec<Station>>,
    history: HashMap<StationId, PriceHistory>,
}

/// Mock station source that serves data from memory.
///
/// Cloning shares the same data and call counter. The `with_*` builders
/// panic once a clone exists.
#[derive(Clone, Default)]
pub struct MockStationSource {
    data: Arc<RwLock<MockData>>,
    station_calls: Arc<AtomicUsize>,
}

impl MockStationSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mock source from an offline data file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SourceError::Mock {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&json).map_err(|e| match e {
            SourceError::Mock { message } => SourceError::Mock {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    /// Load a mock source from the contents of an offline data file.
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let file: MockFile = serde_json::from_str(json).map_err(|e| SourceError::Mock {
            message: format!("failed to parse mock data: {e}"),
        })?;

        let mut history = HashMap::with_capacity(file.history.len());
        for (id, dto) in file.history {
            let converted = convert_history(dto).map_err(|e| SourceError::Mock {
                message: format!("history of station {id}: {e}"),
            })?;
            history.insert(StationId(id), converted);
        }

        let data = MockData {
            provinces: file.provinces.into_iter().map(convert_province).collect(),
            localities: file.localities.into_iter().map(convert_locality).collect(),
            stations: file
                .stations
                .into_iter()
                .map(|(locality, records)| (locality, convert_stations(records)))
                .collect(),
            history,
        };

        Ok(Self {
            data: Arc::new(RwLock::new(data)),
            station_calls: Arc::default(),
        })
    }

    /// Add a province.
    pub fn with_province(self, province: Province) -> Self {
        self.edit(|data| data.provinces.push(province))
    }

    /// Add a locality.
    pub fn with_locality(self, locality: Locality) -> Self {
        self.edit(|data| data.localities.push(locality))
    }

    /// Set the station list of a locality.
    pub fn with_stations(self, locality_id: u32, stations: Vec<Station>) -> Self {
        self.edit(|data| {
            data.stations.insert(locality_id, stations);
        })
    }

    /// Set the price history of a station.
    pub fn with_history(self, history: PriceHistory) -> Self {
        self.edit(|data| {
            data.history.insert(history.station_id, history);
        })
    }

    /// Apply a builder edit.
    ///
    /// # Panics
    ///
    /// If the source has already been cloned. Builders configure a source
    /// before it is shared; use `insert_stations` on a live one.
    fn edit(mut self, f: impl FnOnce(&mut MockData)) -> Self {
        match Arc::get_mut(&mut self.data) {
            Some(data) => f(data.get_mut()),
            None => panic!("MockStationSource builder called on a shared source"),
        }
        self
    }

    /// Replace the station list of a locality on a live source.
    pub async fn insert_stations(&self, locality_id: u32, stations: Vec<Station>) {
        self.data.write().await.stations.insert(locality_id, stations);
    }

    /// Number of `stations` calls served so far, including failed ones.
    pub fn station_calls(&self) -> usize {
        self.station_calls.load(Ordering::SeqCst)
    }
}

fn not_found(resource: String) -> SourceError {
    SourceError::NotFound { resource }
}

/// Great-circle distance between two points.
fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

impl StationSource for MockStationSource {
    async fn provinces(&self) -> Result<Vec<Province>, SourceError> {
        Ok(self.data.read().await.provinces.clone())
    }

    async fn localities(&self, province_id: u32) -> Result<Vec<Locality>, SourceError> {
        let data = self.data.read().await;
        Ok(data
            .localities
            .iter()
            .filter(|l| l.province_id == province_id)
            .cloned()
            .collect())
    }

    async fn stations(&self, locality_id: u32) -> Result<Vec<Station>, SourceError> {
        self.station_calls.fetch_add(1, Ordering::SeqCst);
        let data = self.data.read().await;
        data.stations
            .get(&locality_id)
            .cloned()
            .ok_or_else(|| not_found(format!("locality {locality_id}")))
    }

    async fn nearest(&self, query: NearbyQuery) -> Result<Vec<NearbyStation>, SourceError> {
        let origin = Coordinates {
            latitude: query.latitude,
            longitude: query.longitude,
        };
        let data = self.data.read().await;

        let mut found: Vec<NearbyStation> = data
            .stations
            .values()
            .flatten()
            .filter_map(|station| {
                let distance = haversine_km(origin, station.coordinates?);
                (distance <= query.radius_km).then(|| NearbyStation {
                    station: station.clone(),
                    distance_km: Some(distance),
                })
            })
            .collect();
        found.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.station.id.cmp(&b.station.id))
        });

        let limit = query.limit as usize;
        let skip = (query.page.max(1) as usize - 1) * limit;
        Ok(found.into_iter().skip(skip).take(limit).collect())
    }

    async fn detail(&self, id: StationId) -> Result<Station, SourceError> {
        let data = self.data.read().await;
        data.stations
            .values()
            .flatten()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("station {id}")))
    }

    async fn history(
        &self,
        id: StationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PriceHistory, SourceError> {
        let data = self.data.read().await;
        let history = data
            .history
            .get(&id)
            .ok_or_else(|| not_found(format!("history of station {id}")))?;

        let mut history = history.clone();
        history.entries.retain(|e| {
            let day = e.recorded_at.date_naive();
            from <= day && day <= to
        });
        Ok(history)
    }
}
