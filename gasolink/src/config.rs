//! Runtime configuration for the gasolink binary.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::source::{CacheConfig, DEFAULT_BASE_URL, SourceConfig};

/// Name of the directory created under the data directory.
pub const APP_DIR: &str = "gasolink";

/// File the favorites list is stored in.
pub const FAVORITES_FILE: &str = "favorites.json";

/// A configuration value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },

    /// No data directory was configured and the platform has none
    #[error("no data directory available; set GASOLINK_DATA_DIR")]
    NoDataDir,
}

/// Configuration read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the price API.
    pub api_base_url: String,

    /// HTTP request timeout (seconds).
    pub timeout_secs: u64,

    /// How long station lists stay cached (seconds).
    pub cache_ttl_secs: u64,

    /// Directory holding the `gasolink` data folder. `None` means the
    /// platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Locality to browse on startup.
    pub locality: Option<u32>,

    /// Offline data file; when set, no network requests are made.
    pub mock_data: Option<PathBuf>,
}

impl AppConfig {
    /// Read `GASOLINK_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            api_base_url: get("GASOLINK_API_BASE_URL").unwrap_or(defaults.api_base_url),
            timeout_secs: parse_var("GASOLINK_TIMEOUT_SECS", get("GASOLINK_TIMEOUT_SECS"))?
                .unwrap_or(defaults.timeout_secs),
            cache_ttl_secs: parse_var("GASOLINK_CACHE_TTL_SECS", get("GASOLINK_CACHE_TTL_SECS"))?
                .unwrap_or(defaults.cache_ttl_secs),
            data_dir: get("GASOLINK_DATA_DIR").map(PathBuf::from),
            locality: parse_var("GASOLINK_LOCALITY", get("GASOLINK_LOCALITY"))?,
            mock_data: get("GASOLINK_MOCK_DATA").map(PathBuf::from),
        })
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_cache_ttl(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_locality(mut self, locality: u32) -> Self {
        self.locality = Some(locality);
        self
    }

    pub fn with_mock_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.mock_data = Some(path.into());
        self
    }

    /// Where the favorites file lives: `<data dir>/gasolink/favorites.json`.
    pub fn favorites_path(&self) -> Result<PathBuf, ConfigError> {
        let base = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir().ok_or(ConfigError::NoDataDir)?,
        };
        Ok(base.join(APP_DIR).join(FAVORITES_FILE))
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::new()
            .with_base_url(&self.api_base_url)
            .with_timeout(self.timeout_secs)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.cache_ttl_secs),
            ..CacheConfig::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            cache_ttl_secs: 300,
            data_dir: None,
            locality: None,
            mock_data: None,
        }
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                message: format!("{v:?}: {e}"),
            })
        })
        .transpose()
}
