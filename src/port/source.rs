//! Upstream data source port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    ArbitrageOpportunity, BestOddsPick, ConsensusBet, LineDiscrepancy, Quote, ValueBet,
};
use crate::error::Result;

/// Supplies raw quotes and pre-classified opportunities for a date.
///
/// # Implementation Notes
///
/// - Reads for one date are issued together as a batch; callers treat any
///   single failure as failure of the whole batch.
/// - Opportunity readers should drop individual malformed records rather
///   than fail the read.
/// - `trigger_refresh` may block for a long time and must report failure
///   as [`SourceError::RefreshFailed`](crate::error::SourceError::RefreshFailed).
#[async_trait]
pub trait PropSource: Send + Sync {
    /// Default date to use when none is selected.
    async fn today(&self) -> Result<NaiveDate>;

    async fn quotes(&self, date: NaiveDate) -> Result<Vec<Quote>>;

    async fn arbitrage(&self, date: NaiveDate) -> Result<Vec<ArbitrageOpportunity>>;

    async fn value_bets(&self, date: NaiveDate) -> Result<Vec<ValueBet>>;

    async fn consensus_bets(&self, date: NaiveDate) -> Result<Vec<ConsensusBet>>;

    async fn discrepancies(&self, date: NaiveDate) -> Result<Vec<LineDiscrepancy>>;

    async fn best_odds(&self, date: NaiveDate) -> Result<Vec<BestOddsPick>>;

    /// Ask the source to re-ingest. Updated data appears under the same
    /// date keys once this returns `Ok`.
    async fn trigger_refresh(&self) -> Result<()>;

    /// Name for logging and debugging.
    fn source_name(&self) -> &'static str;
}
