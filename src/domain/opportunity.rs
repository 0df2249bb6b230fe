//! Pre-classified betting opportunities.
//!
//! Detection happens upstream; records arrive already labelled by kind.
//! Ranking fields are optional so a record with a missing or non-numeric
//! ranking value still loads and is simply unrankable.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::favorites::FavoriteKey;
use super::odds::{self, StakeSplit};
use super::quote::Side;

/// Identity shared by every opportunity kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropSubject {
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub prop_type: String,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

impl PropSubject {
    pub fn key(&self) -> FavoriteKey {
        FavoriteKey::new(&self.player, &self.prop_type)
    }
}

/// Over at one book, under at another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    #[serde(flatten)]
    pub subject: PropSubject,
    #[serde(default)]
    pub line: Option<f64>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub over_odds: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub under_odds: Option<i32>,
    #[serde(default)]
    pub bet_over: String,
    #[serde(default)]
    pub bet_under: String,
    #[serde(default)]
    pub profit_percent: Option<f64>,
}

impl ArbitrageOpportunity {
    /// Balanced stake split for this pair.
    pub fn stake_split(&self, total_stake: f64) -> StakeSplit {
        odds::stake_split(self.over_odds, self.under_odds, total_stake)
    }
}

/// Odds for both sides at the two reference books.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BookOddsSnapshot {
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub dk_over: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub dk_under: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub fd_over: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub fd_under: Option<i32>,
}

/// Positive expected value on one side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueBet {
    #[serde(flatten)]
    pub subject: PropSubject,
    #[serde(default)]
    pub line: Option<f64>,
    #[serde(default)]
    pub recommended_side: Option<Side>,
    #[serde(default)]
    pub best_book: String,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub best_odds: Option<i32>,
    #[serde(default)]
    pub edge_percent: Option<f64>,
    #[serde(default)]
    pub all_odds: Option<BookOddsSnapshot>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Both books favor a side but one prices it at a discount.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsensusBet {
    #[serde(flatten)]
    pub subject: PropSubject,
    #[serde(default)]
    pub line: Option<f64>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub best_book: String,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub best_odds: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub other_odds: Option<i32>,
    #[serde(default)]
    pub odds_difference: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// The reference books disagree on the line itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineDiscrepancy {
    #[serde(flatten)]
    pub subject: PropSubject,
    #[serde(default)]
    pub dk_line: Option<f64>,
    #[serde(default)]
    pub fd_line: Option<f64>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub dk_over: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub dk_under: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub fd_over: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub fd_under: Option<i32>,
    #[serde(default)]
    pub line_difference: Option<f64>,
}

/// Same line, one book pays noticeably more.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BestOddsPick {
    #[serde(flatten)]
    pub subject: PropSubject,
    #[serde(default)]
    pub line: Option<f64>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub best_book: String,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub best_odds: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub other_odds: Option<i32>,
    #[serde(default)]
    pub odds_difference: Option<f64>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub dk_odds: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub fd_odds: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpportunityKind {
    Arbitrage,
    Value,
    Consensus,
    Discrepancy,
    BestOdds,
}

impl fmt::Display for OpportunityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arbitrage => "arbitrage",
            Self::Value => "value",
            Self::Consensus => "consensus",
            Self::Discrepancy => "discrepancy",
            Self::BestOdds => "best-odds",
        };
        f.write_str(name)
    }
}

/// Any pre-classified opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Opportunity {
    Arbitrage(ArbitrageOpportunity),
    Value(ValueBet),
    Consensus(ConsensusBet),
    Discrepancy(LineDiscrepancy),
    BestOdds(BestOddsPick),
}

impl Opportunity {
    pub fn kind(&self) -> OpportunityKind {
        match self {
            Self::Arbitrage(_) => OpportunityKind::Arbitrage,
            Self::Value(_) => OpportunityKind::Value,
            Self::Consensus(_) => OpportunityKind::Consensus,
            Self::Discrepancy(_) => OpportunityKind::Discrepancy,
            Self::BestOdds(_) => OpportunityKind::BestOdds,
        }
    }

    pub fn subject(&self) -> &PropSubject {
        match self {
            Self::Arbitrage(o) => &o.subject,
            Self::Value(o) => &o.subject,
            Self::Consensus(o) => &o.subject,
            Self::Discrepancy(o) => &o.subject,
            Self::BestOdds(o) => &o.subject,
        }
    }

    /// Book carrying the recommended price, for kinds that name one.
    pub fn best_book(&self) -> Option<&str> {
        match self {
            Self::Value(o) => Some(&o.best_book),
            Self::Consensus(o) => Some(&o.best_book),
            Self::BestOdds(o) => Some(&o.best_book),
            Self::Arbitrage(_) | Self::Discrepancy(_) => None,
        }
    }

    /// The per-kind numeric ranking value. `None` when missing or not finite.
    pub fn ranking_key(&self) -> Option<f64> {
        let raw = match self {
            Self::Arbitrage(o) => o.profit_percent,
            Self::Value(o) => o.edge_percent,
            Self::Consensus(o) => o.odds_difference,
            Self::Discrepancy(o) => o.line_difference,
            Self::BestOdds(o) => o.odds_difference,
        };
        raw.filter(|v| v.is_finite())
    }
}

/// The five opportunity collections for one date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunitySets {
    pub arbitrage: Vec<ArbitrageOpportunity>,
    pub value: Vec<ValueBet>,
    pub consensus: Vec<ConsensusBet>,
    pub discrepancies: Vec<LineDiscrepancy>,
    pub best_odds: Vec<BestOddsPick>,
}

impl OpportunitySets {
    pub fn is_empty(&self) -> bool {
        self.arbitrage.is_empty()
            && self.value.is_empty()
            && self.consensus.is_empty()
            && self.discrepancies.is_empty()
            && self.best_odds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.arbitrage.len()
            + self.value.len()
            + self.consensus.len()
            + self.discrepancies.len()
            + self.best_odds.len()
    }

    /// Records of one kind, wrapped as [`Opportunity`].
    pub fn of_kind(&self, kind: OpportunityKind) -> Vec<Opportunity> {
        match kind {
            OpportunityKind::Arbitrage => wrap(&self.arbitrage, Opportunity::Arbitrage),
            OpportunityKind::Value => wrap(&self.value, Opportunity::Value),
            OpportunityKind::Consensus => wrap(&self.consensus, Opportunity::Consensus),
            OpportunityKind::Discrepancy => wrap(&self.discrepancies, Opportunity::Discrepancy),
            OpportunityKind::BestOdds => wrap(&self.best_odds, Opportunity::BestOdds),
        }
    }
}

fn wrap<T: Clone>(records: &[T], variant: fn(T) -> Opportunity) -> Vec<Opportunity> {
    records.iter().cloned().map(variant).collect()
}

/// Decode a JSON array record by record, dropping entries that do not fit
/// `T` instead of failing the whole collection.
pub fn decode_records<T: DeserializeOwned>(label: &str, values: Vec<serde_json::Value>) -> Vec<T> {
    let total = values.len();
    let decoded: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(collection = label, index, %error, "Dropping malformed record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        warn!(collection = label, kept = decoded.len(), total, "Some records were malformed");
    }
    decoded
}
