//! In-memory [`PropSource`] with scripted data and failure injection.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::{
    ArbitrageOpportunity, BestOddsPick, ConsensusBet, LineDiscrepancy, OpportunitySets, Quote,
    ValueBet,
};
use crate::error::{Result, SourceError};
use crate::port::PropSource;

/// Everything the source serves for one date.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub quotes: Vec<Quote>,
    pub opportunities: OpportunitySets,
}

/// A scripted source.
///
/// Endpoints named in `fail_endpoints` return `SourceUnavailable`; dates
/// with no fixture serve empty collections. After a successful
/// `trigger_refresh`, a staged fixture (if any) replaces the date's data.
pub struct ScriptedSource {
    today: NaiveDate,
    fixtures: Mutex<HashMap<NaiveDate, Fixture>>,
    staged: Mutex<Option<(NaiveDate, Fixture)>>,
    fail_endpoints: Mutex<HashSet<&'static str>>,
    refresh_error: Mutex<Option<String>>,
    hold_refresh: Mutex<Option<Arc<Notify>>>,
    batch_count: Arc<AtomicU32>,
    trigger_count: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            fixtures: Mutex::new(HashMap::new()),
            staged: Mutex::new(None),
            fail_endpoints: Mutex::new(HashSet::new()),
            refresh_error: Mutex::new(None),
            hold_refresh: Mutex::new(None),
            batch_count: Arc::new(AtomicU32::new(0)),
            trigger_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_fixture(self, date: NaiveDate, fixture: Fixture) -> Self {
        self.set_fixture(date, fixture);
        self
    }

    pub fn set_fixture(&self, date: NaiveDate, fixture: Fixture) {
        self.fixtures.lock().insert(date, fixture);
    }

    /// Serve `fixture` for `date` once the next re-scrape succeeds.
    pub fn stage_after_refresh(&self, date: NaiveDate, fixture: Fixture) {
        *self.staged.lock() = Some((date, fixture));
    }

    /// Make `endpoint` (e.g. `"value-bets"`) fail until cleared.
    pub fn fail_endpoint(&self, endpoint: &'static str) {
        self.fail_endpoints.lock().insert(endpoint);
    }

    pub fn clear_failures(&self) {
        self.fail_endpoints.lock().clear();
    }

    /// Make the next re-scrape triggers fail with `reason`.
    pub fn fail_refresh(&self, reason: &str) {
        *self.refresh_error.lock() = Some(reason.to_string());
    }

    /// Block `trigger_refresh` until the returned handle is notified.
    pub fn hold_refresh(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold_refresh.lock() = Some(notify.clone());
        notify
    }

    /// Number of batches started (counted on the quotes read).
    pub fn batch_count(&self) -> u32 {
        self.batch_count.load(Ordering::SeqCst)
    }

    pub fn trigger_count(&self) -> u32 {
        self.trigger_count.load(Ordering::SeqCst)
    }

    fn read<T>(
        &self,
        endpoint: &'static str,
        date: NaiveDate,
        pick: impl FnOnce(&Fixture) -> Vec<T>,
    ) -> Result<Vec<T>> {
        if self.fail_endpoints.lock().contains(endpoint) {
            return Err(SourceError::Unavailable {
                endpoint: endpoint.to_string(),
                reason: "HTTP 500 Internal Server Error".to_string(),
            }
            .into());
        }
        Ok(self.fixtures.lock().get(&date).map(pick).unwrap_or_default())
    }
}

#[async_trait]
impl PropSource for ScriptedSource {
    async fn today(&self) -> Result<NaiveDate> {
        if self.fail_endpoints.lock().contains("today") {
            return Err(SourceError::Unavailable {
                endpoint: "today".to_string(),
                reason: "HTTP 503 Service Unavailable".to_string(),
            }
            .into());
        }
        Ok(self.today)
    }

    async fn quotes(&self, date: NaiveDate) -> Result<Vec<Quote>> {
        self.batch_count.fetch_add(1, Ordering::SeqCst);
        self.read("props", date, |f| f.quotes.clone())
    }

    async fn arbitrage(&self, date: NaiveDate) -> Result<Vec<ArbitrageOpportunity>> {
        self.read("arbitrage", date, |f| f.opportunities.arbitrage.clone())
    }

    async fn value_bets(&self, date: NaiveDate) -> Result<Vec<ValueBet>> {
        self.read("value-bets", date, |f| f.opportunities.value.clone())
    }

    async fn consensus_bets(&self, date: NaiveDate) -> Result<Vec<ConsensusBet>> {
        self.read("consensus-bets", date, |f| f.opportunities.consensus.clone())
    }

    async fn discrepancies(&self, date: NaiveDate) -> Result<Vec<LineDiscrepancy>> {
        self.read("discrepancies", date, |f| f.opportunities.discrepancies.clone())
    }

    async fn best_odds(&self, date: NaiveDate) -> Result<Vec<BestOddsPick>> {
        self.read("best-odds", date, |f| f.opportunities.best_odds.clone())
    }

    async fn trigger_refresh(&self) -> Result<()> {
        self.trigger_count.fetch_add(1, Ordering::SeqCst);

        let hold = self.hold_refresh.lock().take();
        if let Some(notify) = hold {
            notify.notified().await;
        }

        if let Some(reason) = self.refresh_error.lock().clone() {
            return Err(SourceError::RefreshFailed(reason).into());
        }

        if let Some((date, fixture)) = self.staged.lock().take() {
            self.set_fixture(date, fixture);
        }
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
