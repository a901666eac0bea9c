//! Browsing stations around a point.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::NearbyStation;
use crate::engine::{NEARBY_PAGE_SIZE, NearbySortKey, PageState, Paginated, paginate, sort_nearby};
use crate::source::{NearbyQuery, StationSource};

use super::error::BrowseError;

/// One page of proximity results.
pub type NearbyPage = Paginated<NearbyStation>;

#[derive(Debug)]
struct State {
    generation: u64,
    query: Option<NearbyQuery>,
    results: Option<Arc<Vec<NearbyStation>>>,
    loading: bool,
    sort: NearbySortKey,
    page: PageState,
}

/// Proximity search results with client-side sort and paging.
pub struct NearbyBrowser<S> {
    source: S,
    state: RwLock<State>,
}

impl<S: StationSource> NearbyBrowser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(State {
                generation: 0,
                query: None,
                results: None,
                loading: false,
                sort: NearbySortKey::default(),
                page: PageState::new(NEARBY_PAGE_SIZE),
            }),
        }
    }

    /// Run a new proximity search, replacing the previous results.
    pub async fn search(&self, query: NearbyQuery) -> Result<usize, BrowseError> {
        let ticket = self.begin_search(query).await;
        self.fetch(query, ticket).await
    }

    /// Repeat the last search.
    pub async fn refresh(&self) -> Result<usize, BrowseError> {
        let (query, ticket) = {
            let mut state = self.state.write().await;
            let query = state.query.ok_or(BrowseError::NothingSelected)?;
            state.generation += 1;
            state.loading = true;
            (query, state.generation)
        };
        self.fetch(query, ticket).await
    }

    async fn begin_search(&self, query: NearbyQuery) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.query = Some(query);
        state.results = None;
        state.loading = true;
        state.page.reset();
        state.generation
    }

    async fn fetch(&self, query: NearbyQuery, ticket: u64) -> Result<usize, BrowseError> {
        let result = self.source.nearest(query).await;

        let mut state = self.state.write().await;
        if state.generation != ticket {
            debug!(
                latitude = query.latitude,
                longitude = query.longitude,
                "dropping superseded proximity results"
            );
            return Err(BrowseError::Superseded);
        }
        state.loading = false;

        match result {
            Ok(results) => {
                let count = results.len();
                info!(count, radius_km = query.radius_km, "proximity results loaded");
                state.results = Some(Arc::new(results));
                state.page.reset();
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "proximity results unavailable");
                state.results = None;
                Err(e.into())
            }
        }
    }

    pub async fn set_sort(&self, sort: NearbySortKey) {
        let mut state = self.state.write().await;
        state.sort = sort;
        state.page.reset();
    }

    pub async fn set_page(&self, page: usize) {
        self.state.write().await.page.set_page(page);
    }

    /// The current page of results in the selected order.
    pub async fn page(&self) -> NearbyPage {
        let mut state = self.state.write().await;
        let mut results = state
            .results
            .as_deref()
            .cloned()
            .unwrap_or_default();
        sort_nearby(&mut results, state.sort);

        let paged = paginate(results, state.page.current_page(), state.page.page_size());
        state.page.set_page(paged.current_page);
        paged
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn query(&self) -> Option<NearbyQuery> {
        self.state.read().await.query
    }
}
