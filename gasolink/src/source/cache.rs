//! Caching layer for station lists.
//!
//! Region lists barely change and a locality's station list is refreshed
//! by the backend a few times a day, so both are kept in memory for a TTL.
//! Detail, history and proximity queries always go to the inner source.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Locality, NearbyStation, PriceHistory, Province, Station, StationId};

use super::error::SourceError;
use super::{NearbyQuery, StationSource};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached station lists.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 200,
        }
    }
}

/// Station source with in-memory caching of list endpoints.
///
/// Wraps another `StationSource`. Errors are never cached.
pub struct CachedStationSource<S> {
    inner: S,
    provinces: MokaCache<(), Arc<Vec<Province>>>,
    localities: MokaCache<u32, Arc<Vec<Locality>>>,
    stations: MokaCache<u32, Arc<Vec<Station>>>,
}

impl<S: StationSource> CachedStationSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        Self {
            inner,
            provinces: MokaCache::builder().time_to_live(config.ttl).build(),
            localities: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            stations: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.provinces.invalidate_all();
        self.localities.invalidate_all();
        self.stations.invalidate_all();
    }
}

impl<S: StationSource> StationSource for CachedStationSource<S> {
    async fn provinces(&self) -> Result<Vec<Province>, SourceError> {
        if let Some(cached) = self.provinces.get(&()).await {
            return Ok(cached.as_ref().clone());
        }
        let fresh = Arc::new(self.inner.provinces().await?);
        self.provinces.insert((), fresh.clone()).await;
        Ok(fresh.as_ref().clone())
    }

    async fn localities(&self, province_id: u32) -> Result<Vec<Locality>, SourceError> {
        if let Some(cached) = self.localities.get(&province_id).await {
            return Ok(cached.as_ref().clone());
        }
        let fresh = Arc::new(self.inner.localities(province_id).await?);
        self.localities.insert(province_id, fresh.clone()).await;
        Ok(fresh.as_ref().clone())
    }

    async fn stations(&self, locality_id: u32) -> Result<Vec<Station>, SourceError> {
        if let Some(cached) = self.stations.get(&locality_id).await {
            debug!(locality_id, "station list cache hit");
            return Ok(cached.as_ref().clone());
        }
        let fresh = Arc::new(self.inner.stations(locality_id).await?);
        self.stations.insert(locality_id, fresh.clone()).await;
        Ok(fresh.as_ref().clone())
    }

    async fn nearest(&self, query: NearbyQuery) -> Result<Vec<NearbyStation>, SourceError> {
        self.inner.nearest(query).await
    }

    async fn detail(&self, id: StationId) -> Result<Station, SourceError> {
        self.inner.detail(id).await
    }

    async fn history(
        &self,
        id: StationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PriceHistory, SourceError> {
        self.inner.history(id, from, to).await
    }

    async fn invalidate_locality(&self, locality_id: u32) {
        debug!(locality_id, "dropping cached station list");
        self.stations.invalidate(&locality_id).await;
        self.inner.invalidate_locality(locality_id).await;
    }
}
