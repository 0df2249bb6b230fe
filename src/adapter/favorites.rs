//! Favorites stores: a JSON file and an in-memory stand-in.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{FavoriteKey, FavoritesIndex};
use crate::error::Result;
use crate::port::FavoritesStore;

/// Persists favorites as a pretty-printed JSON array of keys.
#[derive(Debug, Clone)]
pub struct JsonFavoritesStore {
    path: PathBuf,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn load(&self) -> Result<FavoritesIndex> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No favorites file yet");
            return Ok(FavoritesIndex::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let keys: Vec<FavoriteKey> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = keys.len(), "Loaded favorites");
        Ok(keys.into_iter().collect())
    }

    fn save(&self, favorites: &FavoritesIndex) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let keys: Vec<&FavoriteKey> = favorites.iter().collect();
        fs::write(&self.path, serde_json::to_string_pretty(&keys)?)?;
        debug!(path = %self.path.display(), count = keys.len(), "Saved favorites");
        Ok(())
    }
}

/// Keeps favorites in memory only.
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    saved: Mutex<FavoritesIndex>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(favorites: FavoritesIndex) -> Self {
        Self {
            saved: Mutex::new(favorites),
        }
    }

    /// Current saved contents.
    pub fn snapshot(&self) -> FavoritesIndex {
        self.saved.lock().clone()
    }
}

impl FavoritesStore for MemoryFavoritesStore {
    fn load(&self) -> Result<FavoritesIndex> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, favorites: &FavoritesIndex) -> Result<()> {
        *self.saved.lock() = favorites.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(dir.path().join("nested/favorites.json"));

        assert!(store.load().unwrap().is_empty());

        let mut favorites = FavoritesIndex::new();
        favorites.toggle("Jalen Brunson", "points");
        favorites.toggle("Josh Hart", "rebounds");
        store.save(&favorites).unwrap();

        assert_eq!(store.load().unwrap(), favorites);
    }

    #[test]
    fn json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(&path, "{not json").unwrap();

        assert!(JsonFavoritesStore::new(path).load().is_err());
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryFavoritesStore::new();
        let mut favorites = FavoritesIndex::new();
        favorites.toggle("A", "points");
        store.save(&favorites).unwrap();
        assert!(store.snapshot().is_favorite("A", "points"));
    }
}
