//! The saved-station record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::lenient::{opt_f64, string_or_number};
use crate::domain::{Coordinates, Station};

/// Canonical form of a favorite id: surrounding whitespace removed.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// A station the user saved.
///
/// Ids are compared in normalized form; numeric ids in stored files are
/// read as their decimal string. Fields this crate does not know about
/// are kept and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,

    #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(rename = "localidad", default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(
        rename = "latitud",
        default,
        deserialize_with = "opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<f64>,

    #[serde(
        rename = "longitud",
        default,
        deserialize_with = "opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Favorite {
    pub fn new(id: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            id: normalize_id(id.as_ref()),
            name: name.into(),
            address: None,
            hours: None,
            brand: None,
            locality: None,
            latitude: None,
            longitude: None,
            extra: BTreeMap::new(),
        }
    }

    /// Snapshot the display fields of a station.
    pub fn from_station(station: &Station) -> Self {
        let coordinates = station.coordinates;
        Self {
            address: station.address.clone(),
            hours: station.hours.clone(),
            brand: station.brand.clone(),
            locality: station.locality.clone(),
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            ..Self::new(station.id.to_string(), station.name.clone())
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.id = normalize_id(&self.id);
        self
    }
}
