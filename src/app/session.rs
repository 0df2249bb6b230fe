//! One analyst session: the active date, its snapshot, and favorites.
//!
//! Derived collections are rebuilt wholesale from each new batch. Every
//! fetch carries a generation ticket so a response that arrives after a
//! newer fetch was started (or after the date changed) is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::refresh::{RefreshGate, RefreshState};
use super::snapshot::Snapshot;
use crate::domain::{view, Category, Collections, Criteria, DisplayRecord, FavoritesIndex};
use crate::error::SourceError;
use crate::port::{FavoritesStore, PropSource, Scheduler};

/// What happened to a refresh request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot replaced the old one.
    Applied,
    /// Another refresh was in flight; nothing was started.
    Skipped,
    /// The response was superseded by a newer fetch or a date change.
    Stale,
    /// The batch or the re-scrape failed. The error is also surfaced on
    /// the session.
    Failed(SourceError),
}

/// Identifies one started fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    date: NaiveDate,
}

impl FetchTicket {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Default)]
struct SessionState {
    date: Option<NaiveDate>,
    snapshot: Snapshot,
    error: Option<SourceError>,
}

pub struct Session<S> {
    source: S,
    favorites_store: Box<dyn FavoritesStore>,
    favorites: RwLock<FavoritesIndex>,
    state: RwLock<SessionState>,
    generation: AtomicU64,
    gate: RefreshGate,
}

impl<S: PropSource> Session<S> {
    /// Create a session, loading saved favorites. A store that fails to
    /// load starts the session with no favorites.
    pub fn new(source: S, favorites_store: impl FavoritesStore + 'static) -> Self {
        let favorites = favorites_store.load().unwrap_or_else(|error| {
            warn!(%error, "Could not load favorites, starting empty");
            FavoritesIndex::new()
        });
        debug!(count = favorites.len(), "Favorites loaded");

        Self {
            source,
            favorites_store: Box::new(favorites_store),
            favorites: RwLock::new(favorites),
            state: RwLock::new(SessionState::default()),
            generation: AtomicU64::new(0),
            gate: RefreshGate::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.state.read().date
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.gate.state()
    }

    /// The error surfaced by the last refresh, if it failed.
    pub fn error(&self) -> Option<SourceError> {
        self.state.read().error.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.read().snapshot.clone()
    }

    /// The selected date, or the source's default date when none is set.
    pub async fn resolve_date(&self) -> Result<NaiveDate, SourceError> {
        if let Some(date) = self.date() {
            return Ok(date);
        }
        let date = self
            .source
            .today()
            .await
            .map_err(|e| e.into_unavailable("today"))?;
        let mut state = self.state.write();
        Ok(*state.date.get_or_insert(date))
    }

    /// Make `date` current without fetching. Changing the date discards
    /// the snapshot, so in-flight fetches for the old date become stale.
    pub fn set_date(&self, date: NaiveDate) {
        let mut state = self.state.write();
        if state.date != Some(date) {
            info!(%date, "Date selected");
            state.date = Some(date);
            state.snapshot = Snapshot::empty(date);
            state.error = None;
        }
    }

    /// Switch dates, discarding the current snapshot, then fetch.
    pub async fn select_date(&self, date: NaiveDate) -> RefreshOutcome {
        self.set_date(date);
        let ticket = self.begin_fetch(date);
        let result = Snapshot::fetch(&self.source, date).await;
        self.complete_fetch(ticket, result)
    }

    /// Fetch the current date unless another refresh is in flight.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(_guard) = self.gate.try_begin_fetch() else {
            debug!(state = ?self.gate.state(), "Refresh already in flight");
            return RefreshOutcome::Skipped;
        };
        self.fetch_current().await
    }

    /// Ask the source to re-scrape, then fetch the current date.
    ///
    /// If the re-scrape fails the previous snapshot stays in place and
    /// `RefreshFailed` is surfaced.
    pub async fn full_refresh(&self) -> RefreshOutcome {
        let Some(guard) = self.gate.try_begin_scrape() else {
            debug!(state = ?self.gate.state(), "Refresh already in flight");
            return RefreshOutcome::Skipped;
        };

        if let Err(error) = self.source.trigger_refresh().await {
            let error = match error {
                crate::error::Error::Source(err @ SourceError::RefreshFailed(_)) => err,
                other => SourceError::RefreshFailed(other.to_string()),
            };
            warn!(%error, "Re-scrape failed, keeping previous snapshot");
            self.state.write().error = Some(error.clone());
            return RefreshOutcome::Failed(error);
        }

        guard.advance_to_fetching();
        self.fetch_current().await
    }

    async fn fetch_current(&self) -> RefreshOutcome {
        let date = match self.resolve_date().await {
            Ok(date) => date,
            Err(error) => return self.fail_without_date(error),
        };
        let ticket = self.begin_fetch(date);
        let result = Snapshot::fetch(&self.source, date).await;
        self.complete_fetch(ticket, result)
    }

    fn fail_without_date(&self, error: SourceError) -> RefreshOutcome {
        warn!(%error, "Could not resolve a date");
        let mut state = self.state.write();
        state.snapshot = Snapshot::default();
        state.error = Some(error.clone());
        RefreshOutcome::Failed(error)
    }

    /// Start a fetch for `date`, returning its ticket.
    pub fn begin_fetch(&self, date: NaiveDate) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket { generation, date }
    }

    /// Apply a fetch result unless a newer fetch has started or the date
    /// has changed since.
    ///
    /// A failed batch empties every collection and surfaces the error.
    pub fn complete_fetch(
        &self,
        ticket: FetchTicket,
        result: Result<Snapshot, SourceError>,
    ) -> RefreshOutcome {
        let mut state = self.state.write();
        let newest = self.generation.load(Ordering::SeqCst);
        if ticket.generation < newest || state.date != Some(ticket.date) {
            debug!(
                generation = ticket.generation,
                newest,
                date = %ticket.date,
                "Discarding superseded fetch"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(snapshot) => {
                state.snapshot = snapshot;
                state.error = None;
                RefreshOutcome::Applied
            }
            Err(error) => {
                warn!(%error, date = %ticket.date, "Batch failed, clearing snapshot");
                state.snapshot = Snapshot::empty(ticket.date);
                state.error = Some(error.clone());
                RefreshOutcome::Failed(error)
            }
        }
    }

    /// Run the filter/sort pipeline over the current snapshot.
    pub fn view(&self, category: Category, criteria: &Criteria) -> Vec<DisplayRecord> {
        let state = self.state.read();
        let favorites = self.favorites.read();
        let collections = Collections {
            props: &state.snapshot.props,
            opportunities: &state.snapshot.opportunities,
        };
        view(category, collections, &favorites, criteria)
    }

    /// Flip a favorite and persist the set. Returns the new membership.
    ///
    /// A failed save is logged; the in-memory toggle stands.
    pub fn toggle_favorite(&self, player: &str, prop_type: &str) -> bool {
        let mut favorites = self.favorites.write();
        let now_favorite = favorites.toggle(player, prop_type);
        if let Err(error) = self.favorites_store.save(&favorites) {
            warn!(%error, player, prop_type, "Could not save favorites");
        }
        now_favorite
    }

    pub fn is_favorite(&self, player: &str, prop_type: &str) -> bool {
        self.favorites.read().is_favorite(player, prop_type)
    }

    pub fn favorites(&self) -> FavoritesIndex {
        self.favorites.read().clone()
    }
}

/// Refresh on every scheduler tick until the schedule ends.
///
/// `on_refresh` sees each outcome, including skipped ticks.
pub async fn run_auto_refresh<S, C, F>(session: Arc<Session<S>>, mut scheduler: C, mut on_refresh: F)
where
    S: PropSource,
    C: Scheduler,
    F: FnMut(&Session<S>, &RefreshOutcome),
{
    while scheduler.tick().await {
        let outcome = session.refresh().await;
        match &outcome {
            RefreshOutcome::Skipped => debug!("Scheduled refresh skipped, fetch in flight"),
            RefreshOutcome::Failed(error) => warn!(%error, "Scheduled refresh failed"),
            RefreshOutcome::Stale => debug!("Scheduled refresh superseded"),
            RefreshOutcome::Applied => debug!("Scheduled refresh applied"),
        }
        on_refresh(&session, &outcome);
    }
    info!("Auto-refresh stopped");
}
