//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`PropSource`] - Raw quotes, opportunity collections and the re-scrape trigger
//! - [`FavoritesStore`] - Persistence for the favorites set
//! - [`Scheduler`] - Pacing for automatic refreshes

mod favorites;
mod scheduler;
mod source;

pub use favorites::FavoritesStore;
pub use scheduler::Scheduler;
pub use source::PropSource;
