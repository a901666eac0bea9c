//! HTTP client for the fuel price API.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::{Locality, NearbyStation, PriceHistory, Province, Station, StationId};

use super::convert::{
    convert_history, convert_locality, convert_nearby, convert_province, convert_station,
    convert_stations,
};
use super::error::SourceError;
use super::types::{HistoricDto, LocalityDto, ProvinceDto, StationDto};
use super::{NearbyQuery, StationSource};

/// Default base URL for the price API.
pub const DEFAULT_BASE_URL: &str = "https://api.precioil.es";

/// Configuration for the HTTP station source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Station source backed by the fuel price REST API.
#[derive(Debug, Clone)]
pub struct HttpStationSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStationSource {
    /// Create a new client with the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and parse the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = self.url(path);
        debug!(%url, "fetching");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                resource: path.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SourceError::Json {
            message: e.to_string(),
        })
    }
}

impl StationSource for HttpStationSource {
    async fn provinces(&self) -> Result<Vec<Province>, SourceError> {
        let dtos: Vec<ProvinceDto> = self.get_json("/provincias", &[]).await?;
        Ok(dtos.into_iter().map(convert_province).collect())
    }

    async fn localities(&self, province_id: u32) -> Result<Vec<Locality>, SourceError> {
        let path = format!("/municipios/provincia/{province_id}");
        let dtos: Vec<LocalityDto> = self.get_json(&path, &[]).await?;
        Ok(dtos.into_iter().map(convert_locality).collect())
    }

    async fn stations(&self, locality_id: u32) -> Result<Vec<Station>, SourceError> {
        let path = format!("/estaciones/municipio/{locality_id}");
        let records: Vec<Value> = self.get_json(&path, &[]).await?;
        Ok(convert_stations(records))
    }

    async fn nearest(&self, query: NearbyQuery) -> Result<Vec<NearbyStation>, SourceError> {
        let params = [
            ("latitud", query.latitude.to_string()),
            ("longitud", query.longitude.to_string()),
            ("radio", query.radius_km.to_string()),
            ("pagina", query.page.to_string()),
            ("limite", query.limit.to_string()),
        ];
        let records: Vec<Value> = self.get_json("/estaciones/radio", &params).await?;
        Ok(convert_nearby(records))
    }

    async fn detail(&self, id: StationId) -> Result<Station, SourceError> {
        let path = format!("/estaciones/detalles/{id}");
        let dto: StationDto = self.get_json(&path, &[]).await?;
        Ok(convert_station(dto))
    }

    async fn history(
        &self,
        id: StationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PriceHistory, SourceError> {
        let path = format!("/estaciones/historico/{id}");
        let params = [
            ("fechaInicio", from.format("%Y-%m-%d").to_string()),
            ("fechaFin", to.format("%Y-%m-%d").to_string()),
        ];
        let dto: HistoricDto = self.get_json(&path, &params).await?;
        convert_history(dto).map_err(|e| SourceError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SourceConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = SourceConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn trailing_slash_trimmed() {
        let source =
            HttpStationSource::new(SourceConfig::new().with_base_url("http://localhost:8080/"))
                .unwrap();
        assert_eq!(
            source.url("/provincias"),
            "http://localhost:8080/provincias"
        );
    }
}
