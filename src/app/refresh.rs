//! Single-flight guard for batch fetches.
//!
//! ```text
//!   Idle ──try_begin_fetch──▶ Fetching ──drop──▶ Idle
//!   Idle ──try_begin_scrape─▶ Scraping ──advance──▶ Fetching ──drop──▶ Idle
//! ```
//!
//! A scheduled refresh only starts from `Idle`, so it never overlaps a
//! running fetch or a long manual re-scrape.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Fetching,
    Scraping,
}

#[derive(Debug, Default)]
pub struct RefreshGate {
    state: Mutex<RefreshState>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RefreshState {
        *self.state.lock()
    }

    /// Idle → Fetching. `None` if anything is already in flight.
    pub fn try_begin_fetch(&self) -> Option<RefreshGuard<'_>> {
        self.try_enter(RefreshState::Fetching)
    }

    /// Idle → Scraping. `None` if anything is already in flight.
    pub fn try_begin_scrape(&self) -> Option<RefreshGuard<'_>> {
        self.try_enter(RefreshState::Scraping)
    }

    fn try_enter(&self, next: RefreshState) -> Option<RefreshGuard<'_>> {
        let mut state = self.state.lock();
        if *state != RefreshState::Idle {
            return None;
        }
        *state = next;
        Some(RefreshGuard { gate: self })
    }
}

/// Holds the gate out of `Idle`; returns it to `Idle` on drop.
#[derive(Debug)]
pub struct RefreshGuard<'a> {
    gate: &'a RefreshGate,
}

impl RefreshGuard<'_> {
    /// Scraping → Fetching once the upstream re-scrape has finished.
    pub fn advance_to_fetching(&self) {
        *self.gate.state.lock() = RefreshState::Fetching;
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        *self.gate.state.lock() = RefreshState::Idle;
    }
}
