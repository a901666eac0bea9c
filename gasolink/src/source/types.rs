//! Station API response DTOs.
//!
//! These types map directly to the JSON the price API returns. Station
//! records carry one field per fuel product plus its `_media` average, and
//! the set of fuel fields varies by country, so those are collected into a
//! map and picked apart during conversion.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::lenient;

/// A province, from `/provincias`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceDto {
    pub id_provincia: u32,
    pub nombre_provincia: String,
}

/// A municipality, from `/municipios/provincia/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityDto {
    pub id_municipio: u32,
    pub nombre_municipio: String,
    pub id_provincia: u32,
}

/// A station record, as returned by the locality, proximity and detail
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id_estacion: u64,

    #[serde(default)]
    pub nombre_estacion: Option<String>,

    /// Sign shown at the station (often the brand).
    #[serde(default)]
    pub rotulo: Option<String>,

    #[serde(default)]
    pub marca: Option<String>,

    #[serde(default)]
    pub direccion: Option<String>,

    #[serde(default)]
    pub horario: Option<String>,

    #[serde(default)]
    pub cod_postal: Option<String>,

    #[serde(default)]
    pub localidad: Option<String>,

    #[serde(default)]
    pub provincia: Option<String>,

    /// Sent as a string by some endpoints and a number by others.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub latitud: Option<f64>,

    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub longitud: Option<f64>,

    /// ISO 8601 timestamp of the last price report.
    #[serde(default)]
    pub last_update: Option<String>,

    /// Distance from the query point (proximity endpoint only).
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub distancia: Option<f64>,

    /// Fuel price fields, averages and anything else.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Response from `/estaciones/historico/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricDto {
    #[serde(default)]
    pub title: String,

    #[serde(deserialize_with = "lenient::string_or_number")]
    pub estacion_id: String,

    pub periodo: PeriodDto,

    #[serde(default)]
    pub cantidad_resultados: Option<u64>,

    #[serde(default)]
    pub data: Vec<HistoricItemDto>,
}

/// Date range of a history response.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodDto {
    pub inicio: String,
    pub fin: String,
}

/// One historic price.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricItemDto {
    pub id_precio: u64,
    pub id_estacion: u64,
    pub id_fuel_type: u32,

    /// String or number.
    pub precio: Value,

    pub timestamp: String,
}
