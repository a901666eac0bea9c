//! Test helpers for browser tests.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Semaphore;

use crate::domain::{
    Coordinates, FuelKey, Locality, NearbyStation, Price, PriceHistory, Province, Station,
    StationId,
};
use crate::source::{MockStationSource, NearbyQuery, SourceError, StationSource};

/// A station selling diesel at `price`, located near central Madrid.
pub fn station(id: u64, name: &str, price: &str) -> Station {
    let mut station =
        Station::new(id, name).with_price(FuelKey::Diesel, Price::parse(price).unwrap());
    station.coordinates = Some(Coordinates {
        latitude: 40.4168 + id as f64 / 1000.0,
        longitude: -3.7038,
    });
    station
}

/// Wraps a mock so that one locality's station list and all proximity
/// queries block until a permit is released.
pub struct GatedSource {
    inner: MockStationSource,
    gated_locality: u32,
    gate: Arc<Semaphore>,
}

impl GatedSource {
    pub fn new(inner: MockStationSource, gated_locality: u32) -> Self {
        Self {
            inner,
            gated_locality,
            gate: Arc::new(Semaphore::new(0)),
        }
    }

    pub fn gate(&self) -> Arc<Semaphore> {
        self.gate.clone()
    }

    async fn wait(&self) {
        let _permit = self.gate.acquire().await.unwrap();
    }
}

impl StationSource for GatedSource {
    async fn provinces(&self) -> Result<Vec<Province>, SourceError> {
        self.inner.provinces().await
    }

    async fn localities(&self, province_id: u32) -> Result<Vec<Locality>, SourceError> {
        self.inner.localities(province_id).await
    }

    async fn stations(&self, locality_id: u32) -> Result<Vec<Station>, SourceError> {
        if locality_id == self.gated_locality {
            self.wait().await;
        }
        self.inner.stations(locality_id).await
    }

    async fn nearest(&self, query: NearbyQuery) -> Result<Vec<NearbyStation>, SourceError> {
        if query.radius_km > 50.0 {
            self.wait().await;
        }
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
        self.inner.invalidate_locality(locality_id).await
    }
}
