//! The user's marked (player, propType) pairs.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite `player-propType` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteKey(String);

impl FavoriteKey {
    pub fn new(player: &str, prop_type: &str) -> Self {
        Self(format!("{player}-{prop_type}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FavoriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory favorites set. Persistence lives behind
/// [`FavoritesStore`](crate::port::FavoritesStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesIndex {
    keys: BTreeSet<FavoriteKey>,
}

impl FavoritesIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership. Returns `true` if the pair is now a favorite.
    pub fn toggle(&mut self, player: &str, prop_type: &str) -> bool {
        let key = FavoriteKey::new(player, prop_type);
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn is_favorite(&self, player: &str, prop_type: &str) -> bool {
        self.keys.contains(&FavoriteKey::new(player, prop_type))
    }

    pub fn contains(&self, key: &FavoriteKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteKey> {
        self.keys.iter()
    }
}

impl FromIterator<FavoriteKey> for FavoritesIndex {
    fn from_iter<I: IntoIterator<Item = FavoriteKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
