//! Implementations of ports (hexagonal adapters).

pub mod favorites;
pub mod http;
pub mod scheduler;

pub use favorites::{JsonFavoritesStore, MemoryFavoritesStore};
pub use http::HttpPropSource;
pub use scheduler::IntervalScheduler;
