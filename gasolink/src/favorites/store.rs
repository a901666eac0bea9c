//! The in-memory favorites list and its write path.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use super::backing::FavoritesBacking;
use super::error::FavoritesError;
use super::model::{Favorite, normalize_id};

/// Saved stations, loaded once and written through on every change.
///
/// Mutations queue on a fair lock and run one at a time in arrival
/// order. Each one writes the complete new list to the backing first and
/// only then publishes it, so readers never observe a list that failed to
/// persist.
pub struct FavoritesStore<B> {
    backing: B,
    /// Held for the duration of every load and mutation. The flag records
    /// whether the backing has been read.
    queue: Mutex<bool>,
    snapshot: watch::Sender<Arc<Vec<Favorite>>>,
}

impl<B: FavoritesBacking> FavoritesStore<B> {
    pub fn new(backing: B) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            backing,
            queue: Mutex::new(false),
            snapshot,
        }
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    /// Read the saved list on first use; later calls return the cached list.
    ///
    /// A missing or unreadable backing yields an empty list.
    pub async fn load(&self) -> Arc<Vec<Favorite>> {
        let mut loaded = self.queue.lock().await;
        self.ensure_loaded(&mut loaded).await;
        self.favorites()
    }

    /// Re-read the backing, replacing the cached list.
    pub async fn reload(&self) -> Arc<Vec<Favorite>> {
        let mut loaded = self.queue.lock().await;
        *loaded = false;
        self.ensure_loaded(&mut loaded).await;
        self.favorites()
    }

    /// Save a favorite.
    ///
    /// An entry with the same normalized id is replaced where it stands;
    /// otherwise the favorite is appended.
    pub async fn add(&self, favorite: Favorite) -> Result<(), FavoritesError> {
        let mut loaded = self.queue.lock().await;
        self.ensure_loaded(&mut loaded).await;

        let mut next = self.favorites().as_ref().clone();
        upsert(&mut next, favorite.normalized());
        self.commit(next).await
    }

    /// Forget a favorite. Unknown ids are ignored.
    pub async fn remove(&self, id: &str) -> Result<(), FavoritesError> {
        let mut loaded = self.queue.lock().await;
        self.ensure_loaded(&mut loaded).await;
        self.remove_locked(id).await
    }

    /// Add the favorite if absent, remove it if present.
    ///
    /// Returns whether it is a favorite afterwards.
    pub async fn toggle(&self, favorite: Favorite) -> Result<bool, FavoritesError> {
        let mut loaded = self.queue.lock().await;
        self.ensure_loaded(&mut loaded).await;

        let favorite = favorite.normalized();
        if self.is_favorite(&favorite.id) {
            self.remove_locked(&favorite.id).await?;
            Ok(false)
        } else {
            let mut next = self.favorites().as_ref().clone();
            next.push(favorite);
            self.commit(next).await?;
            Ok(true)
        }
    }

    /// Whether `id` is saved, according to the last committed list.
    pub fn is_favorite(&self, id: &str) -> bool {
        let id = normalize_id(id);
        self.snapshot.borrow().iter().any(|f| f.id == id)
    }

    /// The last committed list.
    pub fn favorites(&self) -> Arc<Vec<Favorite>> {
        self.snapshot.borrow().clone()
    }

    /// Watch the committed list; the receiver sees every later commit.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Favorite>>> {
        self.snapshot.subscribe()
    }

    async fn ensure_loaded(&self, loaded: &mut bool) {
        if *loaded {
            return;
        }

        let favorites = match self.backing.load().await {
            Ok(stored) => stored.into_iter().fold(Vec::new(), |mut acc, f| {
                upsert(&mut acc, f.normalized());
                acc
            }),
            Err(FavoritesError::NotFound) => {
                debug!("no saved favorites");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not read favorites, starting empty");
                Vec::new()
            }
        };

        info!(count = favorites.len(), "favorites loaded");
        self.snapshot.send_replace(Arc::new(favorites));
        *loaded = true;
    }

    async fn remove_locked(&self, id: &str) -> Result<(), FavoritesError> {
        let id = normalize_id(id);
        let current = self.favorites();
        if !current.iter().any(|f| f.id == id) {
            return Ok(());
        }

        let next = current.iter().filter(|f| f.id != id).cloned().collect();
        self.commit(next).await
    }

    async fn commit(&self, next: Vec<Favorite>) -> Result<(), FavoritesError> {
        self.backing.save(&next).await?;
        self.snapshot.send_replace(Arc::new(next));
        Ok(())
    }
}

fn upsert(list: &mut Vec<Favorite>, favorite: Favorite) {
    match list.iter_mut().find(|f| f.id == favorite.id) {
        Some(existing) => *existing = favorite,
        None => list.push(favorite),
    }
}
