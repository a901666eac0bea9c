//! Browse error types.

use crate::source::SourceError;

/// Errors from fetching data for a browsing surface.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    /// The fetch failed; the list is left empty until the next attempt
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A newer selection started before this fetch finished; its result was dropped
    #[error("superseded by a newer request")]
    Superseded,

    /// Refresh was requested before anything was selected
    #[error("nothing selected")]
    NothingSelected,
}
