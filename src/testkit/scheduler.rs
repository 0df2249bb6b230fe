//! Deterministic scheduler for refresh-loop tests.

use async_trait::async_trait;

use crate::port::Scheduler;

/// Ticks immediately `remaining` times, then ends the schedule.
#[derive(Debug, Clone)]
pub struct CountedScheduler {
    remaining: usize,
}

impl CountedScheduler {
    pub fn new(ticks: usize) -> Self {
        Self { remaining: ticks }
    }
}

#[async_trait]
impl Scheduler for CountedScheduler {
    async fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        tokio::task::yield_now().await;
        true
    }
}
