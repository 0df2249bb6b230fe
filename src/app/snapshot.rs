//! Point-in-time data for one date, fetched as a single batch.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::{group, GroupedProp, OpportunitySets, Quote};
use crate::error::{Error, SourceError};
use crate::port::PropSource;

/// All six collections for one date plus the grouped comparison view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub date: Option<NaiveDate>,
    pub quotes: Vec<Quote>,
    pub props: Vec<GroupedProp>,
    pub opportunities: OpportunitySets,
}

impl Snapshot {
    /// An empty snapshot for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Assemble a snapshot, grouping the raw quotes.
    pub fn new(date: NaiveDate, quotes: Vec<Quote>, opportunities: OpportunitySets) -> Self {
        let props = group(&quotes);
        Self {
            date: Some(date),
            quotes,
            props,
            opportunities,
        }
    }

    /// True when every collection is empty.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty() && self.opportunities.is_empty()
    }

    /// Fetch all six collections in parallel.
    ///
    /// The batch is all-or-nothing: the first failing read fails the
    /// whole fetch and no partial data is returned.
    pub async fn fetch<S: PropSource + ?Sized>(
        source: &S,
        date: NaiveDate,
    ) -> Result<Self, SourceError> {
        debug!(source = source.source_name(), %date, "Fetching batch");

        let (quotes, arbitrage, value, consensus, discrepancies, best_odds) = tokio::try_join!(
            tagged("props", source.quotes(date)),
            tagged("arbitrage", source.arbitrage(date)),
            tagged("value-bets", source.value_bets(date)),
            tagged("consensus-bets", source.consensus_bets(date)),
            tagged("discrepancies", source.discrepancies(date)),
            tagged("best-odds", source.best_odds(date)),
        )?;

        let snapshot = Self::new(
            date,
            quotes,
            OpportunitySets {
                arbitrage,
                value,
                consensus,
                discrepancies,
                best_odds,
            },
        );
        info!(
            %date,
            quotes = snapshot.quotes.len(),
            props = snapshot.props.len(),
            opportunities = snapshot.opportunities.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}

async fn tagged<T, F>(endpoint: &'static str, read: F) -> Result<T, SourceError>
where
    F: std::future::Future<Output = Result<T, Error>>,
{
    read.await.map_err(|e| e.into_unavailable(endpoint))
}
