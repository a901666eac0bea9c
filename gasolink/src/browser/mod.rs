//! Stateful browsing over a [`StationSource`](crate::source::StationSource).
//!
//! A browser owns the current selection, the last list fetched for it and
//! the engine state that turns the list into a page. When selections
//! overlap, only the newest one installs its result; older fetches finish
//! with [`BrowseError::Superseded`].

mod detail;
mod error;
mod locality;
mod nearby;
#[cfg(test)]
mod test_support;

pub use detail::{HISTORY_START, StationOverview, station_overview};
pub use error::BrowseError;
pub use locality::LocalityBrowser;
pub use nearby::{NearbyBrowser, NearbyPage};
