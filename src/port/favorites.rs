//! Favorites persistence port.

use crate::domain::FavoritesIndex;
use crate::error::Result;

/// Loads and saves the favorites set across sessions.
///
/// The serialized form is up to the implementation; it only has to
/// round-trip through its own `load`.
pub trait FavoritesStore: Send + Sync {
    /// Load the saved set. A store with nothing saved yet returns an empty set.
    fn load(&self) -> Result<FavoritesIndex>;

    /// Replace the saved set.
    fn save(&self, favorites: &FavoritesIndex) -> Result<()>;
}
