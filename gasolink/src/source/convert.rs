//! Conversion from API DTOs to domain types.
//!
//! Prices are parsed here, once. A fuel field that is `null`, missing or
//! not numeric is dropped for that fuel only; the station itself is kept.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    Coordinates, FuelKey, HistoryEntry, Locality, NearbyStation, Period, Price, PriceHistory,
    Province, Station, StationId, parse_timestamp,
};

use super::types::{HistoricDto, LocalityDto, ProvinceDto, StationDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A station id that is not a non-negative integer
    #[error("invalid station id: {0}")]
    InvalidStationId(String),

    /// A date that is not `YYYY-MM-DD`
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Convert a station record.
pub fn convert_station(dto: StationDto) -> Station {
    let prices = FuelKey::ALL
        .into_iter()
        .filter_map(|fuel| {
            let price = dto.fields.get(fuel.field()).and_then(Price::from_json)?;
            Some((fuel, price))
        })
        .collect();

    let averages = FuelKey::ALL
        .into_iter()
        .filter_map(|fuel| {
            let average = dto
                .fields
                .get(&fuel.average_field())
                .and_then(Price::from_json)?;
            Some((fuel, average))
        })
        .collect();

    let coordinates = match (dto.latitud, dto.longitud) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    };

    let last_update = dto.last_update.as_deref().and_then(|raw| {
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            debug!(station = dto.id_estacion, raw, "unreadable lastUpdate");
        }
        parsed
    });

    Station {
        id: StationId(dto.id_estacion),
        name: dto.nombre_estacion.unwrap_or_default(),
        brand: non_empty(dto.marca).or_else(|| non_empty(dto.rotulo)),
        address: non_empty(dto.direccion),
        hours: non_empty(dto.horario),
        postal_code: non_empty(dto.cod_postal),
        locality: non_empty(dto.localidad),
        province: non_empty(dto.provincia),
        coordinates,
        last_update,
        prices,
        averages,
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Convert a list of raw station records.
///
/// Records that don't match the station shape at all (no id, wrong types)
/// are skipped with a warning rather than failing the whole list.
pub fn convert_stations(records: Vec<Value>) -> Vec<Station> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<StationDto>(record) {
            Ok(dto) => Some(convert_station(dto)),
            Err(e) => {
                warn!(error = %e, "skipping malformed station record");
                None
            }
        })
        .collect()
}

/// Convert proximity results, keeping each record's distance.
pub fn convert_nearby(records: Vec<Value>) -> Vec<NearbyStation> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<StationDto>(record) {
            Ok(dto) => {
                let distance_km = dto.distancia;
                Some(NearbyStation {
                    station: convert_station(dto),
                    distance_km,
                })
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed nearby station record");
                None
            }
        })
        .collect()
}

pub fn convert_province(dto: ProvinceDto) -> Province {
    Province {
        id: dto.id_provincia,
        name: dto.nombre_provincia,
    }
}

pub fn convert_locality(dto: LocalityDto) -> Locality {
    Locality {
        id: dto.id_municipio,
        name: dto.nombre_municipio,
        province_id: dto.id_provincia,
    }
}

/// Parse the date part of `YYYY-MM-DD[...]`.
fn parse_date(s: &str) -> Result<NaiveDate, ConversionError> {
    s.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .ok_or_else(|| ConversionError::InvalidDate(s.to_string()))
}

/// Convert a history response.
///
/// Entries with an unreadable price or timestamp are dropped.
pub fn convert_history(dto: HistoricDto) -> Result<PriceHistory, ConversionError> {
    let station_id = dto
        .estacion_id
        .parse::<u64>()
        .map(StationId)
        .map_err(|_| ConversionError::InvalidStationId(dto.estacion_id.clone()))?;

    let period = Period {
        start: parse_date(&dto.periodo.inicio)?,
        end: parse_date(&dto.periodo.fin)?,
    };

    let mut entries = Vec::with_capacity(dto.data.len());
    for item in dto.data {
        let price = Price::from_json(&item.precio);
        let recorded_at = parse_timestamp(&item.timestamp);
        match (price, recorded_at) {
            (Some(price), Some(recorded_at)) => entries.push(HistoryEntry {
                price_id: item.id_precio,
                station_id: StationId(item.id_estacion),
                fuel_type_id: item.id_fuel_type,
                price,
                recorded_at,
            }),
            _ => debug!(price_id = item.id_precio, "skipping unreadable history entry"),
        }
    }

    if let Some(expected) = dto.cantidad_resultados
        && expected as usize != entries.len()
    {
        debug!(expected, kept = entries.len(), "history entries dropped");
    }

    Ok(PriceHistory {
        title: dto.title,
        station_id,
        period,
        entries,
    })
}
