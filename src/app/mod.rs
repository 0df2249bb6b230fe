//! Application layer: configuration, snapshots, and the session that ties
//! the data source, favorites and the view pipeline together.

pub mod config;
pub mod refresh;
pub mod session;
pub mod snapshot;

pub use config::Config;
pub use refresh::{RefreshGate, RefreshState};
pub use session::{run_auto_refresh, FetchTicket, RefreshOutcome, Session};
pub use snapshot::Snapshot;
