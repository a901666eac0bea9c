//! Durable storage for the favorites list.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use super::error::FavoritesError;
use super::model::Favorite;

/// Where the favorites list is kept between runs.
///
/// `load` returns [`FavoritesError::NotFound`] when nothing was ever saved.
/// `save` replaces the whole list.
pub trait FavoritesBacking: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<Vec<Favorite>, FavoritesError>> + Send;

    fn save(&self, favorites: &[Favorite])
    -> impl Future<Output = Result<(), FavoritesError>> + Send;
}

/// A pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileBacking {
    path: PathBuf,
}

impl JsonFileBacking {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl FavoritesBacking for JsonFileBacking {
    async fn load(&self) -> Result<Vec<Favorite>, FavoritesError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(FavoritesError::NotFound),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    async fn save(&self, favorites: &[Favorite]) -> Result<(), FavoritesError> {
        let json = serde_json::to_string_pretty(favorites)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write aside, then swap in, so the committed file is never truncated.
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-memory backing for tests and for running without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBacking {
    stored: Arc<Mutex<Option<Vec<Favorite>>>>,
    fail_writes: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl MemoryBacking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously saved list.
    pub fn with_saved(favorites: Vec<Favorite>) -> Self {
        Self {
            stored: Arc::new(Mutex::new(Some(favorites))),
            ..Self::default()
        }
    }

    /// Make every following `save` fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// What is currently stored.
    pub async fn stored(&self) -> Option<Vec<Favorite>> {
        self.stored.lock().await.clone()
    }
}

impl FavoritesBacking for MemoryBacking {
    async fn load(&self) -> Result<Vec<Favorite>, FavoritesError> {
        self.stored.lock().await.clone().ok_or(FavoritesError::NotFound)
    }

    async fn save(&self, favorites: &[Favorite]) -> Result<(), FavoritesError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("write refused").into());
        }
        *self.stored.lock().await = Some(favorites.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
