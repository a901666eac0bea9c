//! Browsing the stations of one locality.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::Station;
use crate::engine::{LOCALITY_PAGE_SIZE, StationPage, StationQuery};
use crate::source::StationSource;

use super::error::BrowseError;

#[derive(Debug)]
struct State {
    /// Bumped by every selection or refresh; a fetch only installs its
    /// result if it still holds the latest value.
    generation: u64,
    locality: Option<u32>,
    /// `None` while loading or after a failed fetch.
    stations: Option<Arc<Vec<Station>>>,
    loading: bool,
    query: StationQuery,
}

impl State {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }
}

/// The selected locality, its station list and the filter/sort/page state.
pub struct LocalityBrowser<S> {
    source: S,
    state: RwLock<State>,
}

impl<S: StationSource> LocalityBrowser<S> {
    pub fn new(source: S) -> Self {
        Self::with_page_size(source, LOCALITY_PAGE_SIZE)
    }

    pub fn with_page_size(source: S, page_size: usize) -> Self {
        Self {
            source,
            state: RwLock::new(State {
                generation: 0,
                locality: None,
                stations: None,
                loading: false,
                query: StationQuery::new(page_size),
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Switch to a locality and fetch its stations.
    ///
    /// The previous list is dropped and the page goes back to 1 before the
    /// fetch starts. Returns the number of stations installed.
    pub async fn select_locality(&self, locality_id: u32) -> Result<usize, BrowseError> {
        let ticket = self.begin_selection(locality_id).await;
        self.fetch(locality_id, ticket).await
    }

    /// Fetch the current locality again, bypassing any cached copy. The
    /// current list stays visible until the new one arrives.
    pub async fn refresh(&self) -> Result<usize, BrowseError> {
        let (locality_id, ticket) = self.begin_refresh().await?;
        self.source.invalidate_locality(locality_id).await;
        self.fetch(locality_id, ticket).await
    }

    async fn begin_selection(&self, locality_id: u32) -> u64 {
        let mut state = self.state.write().await;
        state.locality = Some(locality_id);
        state.stations = None;
        state.query.reset_page();
        state.next_generation()
    }

    async fn begin_refresh(&self) -> Result<(u32, u64), BrowseError> {
        let mut state = self.state.write().await;
        let locality_id = state.locality.ok_or(BrowseError::NothingSelected)?;
        Ok((locality_id, state.next_generation()))
    }

    async fn fetch(&self, locality_id: u32, ticket: u64) -> Result<usize, BrowseError> {
        let result = self.source.stations(locality_id).await;

        let mut state = self.state.write().await;
        if state.generation != ticket {
            debug!(locality_id, "dropping superseded station list");
            return Err(BrowseError::Superseded);
        }
        state.loading = false;

        match result {
            Ok(stations) => {
                let count = stations.len();
                info!(locality_id, count, "station list loaded");
                state.stations = Some(Arc::new(stations));
                state.query.reset_page();
                Ok(count)
            }
            Err(e) => {
                warn!(locality_id, error = %e, "station list unavailable");
                state.stations = None;
                Err(e.into())
            }
        }
    }

    /// Change filters, sort or page.
    pub async fn update_query<R>(&self, f: impl FnOnce(&mut StationQuery) -> R) -> R {
        f(&mut self.state.write().await.query)
    }

    /// The page to display for the current state.
    pub async fn page(&self, now: DateTime<Utc>) -> StationPage {
        let mut state = self.state.write().await;
        let stations = state.stations.clone();
        state.query.evaluate(stations.as_deref().map(Vec::as_slice), now)
    }

    pub async fn locality(&self) -> Option<u32> {
        self.state.read().await.locality
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The raw list for the current locality, if loaded.
    pub async fn stations(&self) -> Option<Arc<Vec<Station>>> {
        self.state.read().await.stations.clone()
    }

    pub async fn query(&self) -> StationQuery {
        self.state.read().await.query.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::test_support::{GatedSource, station};
    use crate::domain::FuelKey;
    use crate::engine::{PriceBounds, SortKey};
    use crate::source::{CacheConfig, CachedStationSource, MockStationSource};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    fn mock() -> MockStationSource {
        MockStationSource::new()
            .with_stations(
                1,
                (1..=10)
                    .map(|i| station(i, &format!("Uno {i:02}"), &format!("1.{}", 40 + i)))
                    .collect(),
            )
            .with_stations(2, vec![station(20, "Dos", "1.55")])
    }

    #[tokio::test]
    async fn nothing_selected_gives_empty_page() {
        let browser = LocalityBrowser::new(mock());
        let page = browser.page(now()).await;
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.price_bounds, PriceBounds { min: 1.0, max: 3.0 });
        assert!(matches!(
            browser.refresh().await,
            Err(BrowseError::NothingSelected)
        ));
    }

    #[tokio::test]
    async fn selecting_locality_loads_first_page() {
        let browser = LocalityBrowser::new(mock());
        assert_eq!(browser.select_locality(1).await.unwrap(), 10);
        assert!(!browser.is_loading().await);

        let page = browser.page(now()).await;
        assert_eq!(page.visible.len(), 8);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 1);
    }

    #[tokio::test]
    async fn changing_locality_resets_page() {
        let browser = LocalityBrowser::new(mock());
        browser.select_locality(1).await.unwrap();
        browser.update_query(|q| q.set_page(2)).await;
        assert_eq!(browser.page(now()).await.current_page, 2);

        browser.select_locality(2).await.unwrap();
        assert_eq!(browser.query().await.page().current_page(), 1);
        let page = browser.page(now()).await;
        assert_eq!(page.visible[0].name, "Dos");
    }

    #[tokio::test]
    async fn filters_apply_to_loaded_list() {
        let browser = LocalityBrowser::new(mock());
        browser.select_locality(1).await.unwrap();
        browser
            .update_query(|q| {
                q.toggle_fuel(FuelKey::Diesel, true);
                q.set_price_range(None, Some(1.43));
                q.set_sort(SortKey::PriceDesc);
            })
            .await;

        let page = browser.page(now()).await;
        let ids: Vec<u64> = page.visible.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_list_absent() {
        let browser = LocalityBrowser::new(mock());
        browser.select_locality(1).await.unwrap();

        assert!(matches!(
            browser.select_locality(99).await,
            Err(BrowseError::Source(_))
        ));
        assert!(browser.stations().await.is_none());
        assert!(!browser.is_loading().await);
        assert!(browser.page(now()).await.is_empty());
    }

    #[tokio::test]
    async fn refresh_picks_up_new_data() {
        let source = mock();
        let browser = LocalityBrowser::new(source.clone());
        browser.select_locality(2).await.unwrap();

        source
            .insert_stations(2, vec![station(20, "Dos", "1.55"), station(21, "Tres", "1.60")])
            .await;
        assert_eq!(browser.refresh().await.unwrap(), 2);
        assert_eq!(browser.page(now()).await.filtered_count, 2);
    }

    #[tokio::test]
    async fn slow_response_for_old_locality_is_discarded() {
        let source = GatedSource::new(mock(), 1);
        let gate = source.gate();
        let browser = LocalityBrowser::new(source);

        let slow = browser.select_locality(1);
        let fast = async {
            let result = browser.select_locality(2).await;
            gate.add_permits(1);
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(matches!(slow, Err(BrowseError::Superseded)));
        assert_eq!(fast.unwrap(), 1);
        assert_eq!(browser.locality().await, Some(2));
        let page = browser.page(now()).await;
        assert_eq!(page.visible.len(), 1);
        assert_eq!(page.visible[0].id.0, 20);
    }

    async fn assert_settled<S: StationSource>(
        browser: &LocalityBrowser<S>,
        locality: u32,
        first_id: u64,
    ) {
        assert_eq!(browser.locality().await, Some(locality));
        assert!(!browser.is_loading().await);
        let stations = browser.stations().await.expect("list installed");
        assert_eq!(stations[0].id.0, first_id);
    }

    #[tokio::test]
    async fn refresh_into_changed_list_returns_to_first_page() {
        let source = mock();
        let browser = LocalityBrowser::new(source.clone());
        browser.select_locality(1).await.unwrap();
        browser.update_query(|q| q.set_page(2)).await;
        assert_eq!(browser.page(now()).await.current_page, 2);

        source
            .insert_stations(
                1,
                (1..=20)
                    .map(|i| station(i, &format!("Uno {i:02}"), "1.50"))
                    .collect(),
            )
            .await;
        assert_eq!(browser.refresh().await.unwrap(), 20);

        let page = browser.page(now()).await;
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.visible[0].id.0, 1);
    }

    #[tokio::test]
    async fn selection_started_before_a_finished_one_is_superseded() {
        let browser = LocalityBrowser::new(mock());
        let older = browser.begin_selection(1).await;
        browser.select_locality(2).await.unwrap();

        assert!(matches!(
            browser.fetch(1, older).await,
            Err(BrowseError::Superseded)
        ));
        assert_settled(&browser, 2, 20).await;
    }

    #[tokio::test]
    async fn selection_started_after_a_finished_one_wins() {
        let browser = LocalityBrowser::new(mock());
        browser.select_locality(2).await.unwrap();
        let newer = browser.begin_selection(1).await;
        assert!(browser.is_loading().await);
        assert!(browser.stations().await.is_none());

        assert_eq!(browser.fetch(1, newer).await.unwrap(), 10);
        assert_settled(&browser, 1, 1).await;
    }

    #[tokio::test]
    async fn overlapping_selections_settle_on_the_latest_in_any_completion_order() {
        for newer_completes_first in [true, false] {
            let browser = LocalityBrowser::new(mock());
            let older = browser.begin_selection(2).await;
            let newer = browser.begin_selection(1).await;

            let (first, second) = if newer_completes_first {
                (browser.fetch(1, newer).await, browser.fetch(2, older).await)
            } else {
                let stale = browser.fetch(2, older).await;
                (browser.fetch(1, newer).await, stale)
            };
            assert_eq!(first.unwrap(), 10);
            assert!(matches!(second, Err(BrowseError::Superseded)));
            assert_settled(&browser, 1, 1).await;
        }
    }

    #[tokio::test]
    async fn refresh_overtaken_by_selection_is_superseded() {
        let browser = LocalityBrowser::new(mock());
        browser.select_locality(1).await.unwrap();
        let (locality, ticket) = browser.begin_refresh().await.unwrap();
        assert_eq!(locality, 1);
        browser.select_locality(2).await.unwrap();

        assert!(matches!(
            browser.fetch(locality, ticket).await,
            Err(BrowseError::Superseded)
        ));
        assert_settled(&browser, 2, 20).await;
    }

    #[tokio::test]
    async fn refresh_bypasses_cached_list() {
        let source = mock();
        let browser =
            LocalityBrowser::new(CachedStationSource::new(source.clone(), &CacheConfig::default()));
        assert_eq!(browser.select_locality(2).await.unwrap(), 1);
        assert_eq!(browser.select_locality(2).await.unwrap(), 1);
        assert_eq!(source.station_calls(), 1);

        source
            .insert_stations(2, vec![station(20, "Dos", "1.55"), station(21, "Tres", "1.60")])
            .await;
        assert_eq!(browser.refresh().await.unwrap(), 2);
        assert_eq!(source.station_calls(), 2);
    }
}
