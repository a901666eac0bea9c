//! Station discovery engine.
//!
//! Turns a raw station list and the user's browse state (filters, sort
//! order, page) into the page to display, the page count, and the price
//! bounds for the range control. Everything here is a pure function of its
//! inputs, so results can be memoized and recomputed freely.

mod bounds;
mod filter;
mod nearby;
mod paginate;
mod query;
mod sort;

#[cfg(test)]
mod test_support;

pub use bounds::{DEGENERATE_MARGIN, FALLBACK_BOUNDS, PriceBounds, price_bounds};
pub use filter::{FilterCriteria, PriceRange, RECENT_UPDATE_HOURS, filter_stations};
pub use nearby::{NearbySortKey, sort_nearby};
pub use paginate::{
    LOCALITY_PAGE_SIZE, NEARBY_PAGE_SIZE, PageState, Paginated, paginate, total_pages,
};
pub use query::{StationPage, StationQuery, evaluate};
pub use sort::{
    SortKey, UnknownSortKey, collation_key, compare_names, compare_prices, compare_stations,
    sort_stations,
};
