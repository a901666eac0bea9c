//! Saved stations.
//!
//! [`FavoritesStore`] keeps the list in memory and writes it through a
//! [`FavoritesBacking`] on every change. [`JsonFileBacking`] stores it as a
//! JSON array on disk.

mod backing;
mod error;
mod model;
mod store;

pub use backing::{FavoritesBacking, JsonFileBacking, MemoryBacking};
pub use error::FavoritesError;
pub use model::{Favorite, normalize_id};
pub use store::FavoritesStore;
