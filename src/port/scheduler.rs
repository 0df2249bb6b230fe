//! Periodic refresh scheduling port.

use async_trait::async_trait;

/// Paces periodic refreshes.
#[async_trait]
pub trait Scheduler: Send {
    /// Wait for the next tick. Returns `false` once the schedule has ended.
    async fn tick(&mut self) -> bool;
}
