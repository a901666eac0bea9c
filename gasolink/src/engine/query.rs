//! Evaluating a station list against the current browse state.

use chrono::{DateTime, Utc};

use super::bounds::{PriceBounds, price_bounds};
use super::filter::{FilterCriteria, PriceRange, filter_stations};
use super::paginate::{PageState, paginate};
use super::sort::{SortKey, sort_stations};
use crate::domain::{FuelKey, Station};

/// The visible result of a browse: one page plus what the controls need.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPage {
    /// Stations on the current page, in display order.
    pub visible: Vec<Station>,

    /// The page shown. Reset to 1 when the requested page no longer exists.
    pub current_page: usize,

    /// `ceil(filtered_count / page_size)`; 0 when nothing matches.
    pub total_pages: usize,

    /// Stations matching the filters across all pages.
    pub filtered_count: usize,

    /// Bounds over the unfiltered data.
    pub price_bounds: PriceBounds,
}

impl StationPage {
    /// Whether nothing is shown (no data, or the filters exclude everything).
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Filter, sort and paginate `raw`.
///
/// `raw` is `None` while data is loading or after a failed fetch; that
/// yields an empty page with zero pages. The result depends only on the
/// arguments.
pub fn evaluate(
    raw: Option<&[Station]>,
    criteria: &FilterCriteria,
    sort: SortKey,
    page: PageState,
    now: DateTime<Utc>,
) -> StationPage {
    let raw = raw.unwrap_or(&[]);

    let mut filtered = filter_stations(raw, criteria, now);
    sort_stations(&mut filtered, sort);
    let filtered_count = filtered.len();

    let paged = paginate(filtered, page.current_page(), page.page_size());

    StationPage {
        visible: paged.items.into_iter().cloned().collect(),
        current_page: paged.current_page,
        total_pages: paged.total_pages,
        filtered_count,
        price_bounds: price_bounds(raw),
    }
}

/// Filter, sort and page state for one browsing surface.
///
/// Every change to the filters or the sort order returns to page 1.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationQuery {
    criteria: FilterCriteria,
    sort: SortKey,
    page: PageState,
}

impl StationQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            page: PageState::new(page_size),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    /// Replace the whole filter set.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page.reset();
    }

    /// Select or deselect a fuel.
    pub fn toggle_fuel(&mut self, fuel: FuelKey, selected: bool) {
        if selected {
            self.criteria.fuels.insert(fuel);
        } else {
            self.criteria.fuels.remove(&fuel);
        }
        self.page.reset();
    }

    pub fn set_price_range(&mut self, min: Option<f64>, max: Option<f64>) {
        self.criteria.price_range = PriceRange::new(min, max);
        self.page.reset();
    }

    pub fn set_recently_updated(&mut self, enabled: bool) {
        self.criteria.recently_updated = enabled;
        self.page.reset();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.page.reset();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page.reset();
    }

    /// Change page without touching filters or sort.
    pub fn set_page(&mut self, page: usize) {
        self.page.set_page(page);
    }

    /// Back to page 1, e.g. when the underlying data changes.
    pub fn reset_page(&mut self) {
        self.page.reset();
    }

    /// Default filters and sort, page 1. The page size is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.page.page_size());
    }

    /// Evaluate `raw` against this state.
    ///
    /// If the stored page no longer exists it is reset to the page actually
    /// returned, so the state never points past the data.
    pub fn evaluate(&mut self, raw: Option<&[Station]>, now: DateTime<Utc>) -> StationPage {
        let page = evaluate(raw, &self.criteria, self.sort, self.page, now);
        self.page.set_page(page.current_page);
        page
    }
}
