//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for quotes and opportunity records.
//! - [`source`] - [`ScriptedSource`](source::ScriptedSource), an in-memory
//!   [`PropSource`](crate::port::PropSource) with failure injection.
//! - [`scheduler`] - [`CountedScheduler`](scheduler::CountedScheduler), a
//!   scheduler that ticks a fixed number of times.

pub mod domain;
pub mod scheduler;
pub mod source;
