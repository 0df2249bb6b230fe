//! `propedge favorite`: toggle and list saved player props.

use anyhow::Context;
use serde_json::json;

use super::{output, FavoriteCommand};
use crate::adapter::JsonFavoritesStore;
use crate::app::Config;
use crate::port::FavoritesStore;

pub fn execute(config: &Config, command: &FavoriteCommand) -> anyhow::Result<()> {
    let store = JsonFavoritesStore::new(config.favorites.resolved_path());
    let mut favorites = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    match command {
        FavoriteCommand::Toggle { player, prop_type } => {
            let now_favorite = favorites.toggle(player, prop_type);
            store
                .save(&favorites)
                .with_context(|| format!("failed to write {}", store.path().display()))?;

            if output::is_json() {
                output::json_output(json!({
                    "command": "favorite.toggle",
                    "player": player,
                    "prop_type": prop_type,
                    "favorite": now_favorite,
                }));
            } else if now_favorite {
                output::success(&format!("Added {player} {prop_type}"));
            } else {
                output::success(&format!("Removed {player} {prop_type}"));
            }
        }
        FavoriteCommand::List => {
            if output::is_json() {
                let keys: Vec<&str> = favorites.iter().map(|k| k.as_str()).collect();
                output::json_output(json!({ "command": "favorite.list", "favorites": keys }));
                return Ok(());
            }
            output::section(&format!("Favorites ({})", favorites.len()));
            if favorites.is_empty() {
                output::note("None yet. Add one with `propedge favorite toggle <player> <prop>`.");
            }
            for key in favorites.iter() {
                println!("  ★ {}", key.as_str());
            }
            output::field("File", output::muted(store.path().display()));
        }
    }
    Ok(())
}
