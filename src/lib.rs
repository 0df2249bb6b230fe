//! Propedge - sportsbook player-prop comparison and opportunity ranking.
//!
//! This crate reconciles per-book player-prop quotes for one date into a
//! unified view and presents pre-classified betting opportunities
//! (arbitrage, value, consensus discounts, line discrepancies, best odds)
//! through a single filter/sort pipeline.
//!
//! # Modules
//!
//! - [`domain`] - Odds conversion, quote grouping, favorites and the view pipeline
//! - [`port`] - Traits for the data source, favorites persistence and scheduling
//! - [`adapter`] - HTTP data source, JSON favorites store, tokio interval scheduler
//! - [`app`] - Configuration, batch snapshots and the refresh-aware session
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use propedge::domain::{stake_split, decimal_multiplier};
//!
//! let split = stake_split(Some(150), Some(-170), 100.0);
//! let over_payout = split.stake_over * decimal_multiplier(Some(150)).unwrap();
//! let under_payout = split.stake_under * decimal_multiplier(Some(-170)).unwrap();
//! assert!((over_payout - under_payout).abs() < 1e-9);
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
