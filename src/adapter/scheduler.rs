//! Tokio interval scheduler.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::port::Scheduler;

/// Ticks every `period`, starting one period from now.
///
/// Ticks missed while a refresh was running are skipped rather than
/// replayed in a burst.
pub struct IntervalScheduler {
    interval: Interval,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

#[async_trait]
impl Scheduler for IntervalScheduler {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_after_each_period() {
        let mut scheduler = IntervalScheduler::new(Duration::from_secs(300));
        let start = Instant::now();

        assert!(scheduler.tick().await);
        assert!(start.elapsed() >= Duration::from_secs(300));
        assert!(scheduler.tick().await);
        assert!(start.elapsed() >= Duration::from_secs(600));
        assert_eq!(scheduler.period(), Duration::from_secs(300));
    }
}
