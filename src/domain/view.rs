//! The filter/sort pipeline that turns a snapshot into a display sequence.
//!
//! Steps run in a fixed order: select the base collection, then text,
//! prop-type, favorites and sportsbook filters, then an optional stable
//! sort. Inputs are never mutated; the output is always a fresh `Vec`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::favorites::FavoritesIndex;
use super::opportunity::{Opportunity, OpportunityKind, OpportunitySets};
use super::prop::GroupedProp;

/// Which of the six views to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Arbitrage,
    Value,
    Consensus,
    Discrepancies,
    BestOdds,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Arbitrage,
        Category::Value,
        Category::Consensus,
        Category::Discrepancies,
        Category::BestOdds,
    ];

    fn opportunity_kind(self) -> Option<OpportunityKind> {
        match self {
            Self::All => None,
            Self::Arbitrage => Some(OpportunityKind::Arbitrage),
            Self::Value => Some(OpportunityKind::Value),
            Self::Consensus => Some(OpportunityKind::Consensus),
            Self::Discrepancies => Some(OpportunityKind::Discrepancy),
            Self::BestOdds => Some(OpportunityKind::BestOdds),
        }
    }

    /// Records in this view carry a best-book field the sportsbook filter
    /// can match against.
    pub fn has_best_book(self) -> bool {
        matches!(self, Self::Value | Self::Consensus | Self::BestOdds)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Arbitrage => "arbitrage",
            Self::Value => "value",
            Self::Consensus => "consensus",
            Self::Discrepancies => "discrepancies",
            Self::BestOdds => "best-odds",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown category '{s}' (expected one of: {})",
                    Category::ALL.map(Category::as_str).join(", ")
                )
            })
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Category ranking value, highest first. Unrankable records go last.
    Value,
    /// Player name, A to Z.
    Player,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "value" => Ok(Self::Value),
            "player" => Ok(Self::Player),
            other => Err(format!("unknown sort key '{other}' (expected value or player)")),
        }
    }
}

/// User-selected filters. The default is the identity view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search_text: String,
    /// `None` means every prop type.
    pub prop_type: Option<String>,
    /// `None` means every sportsbook.
    pub sportsbook: Option<String>,
    pub favorites_only: bool,
    /// `None` keeps source order.
    pub sort: Option<SortKey>,
}

impl Criteria {
    /// Interpret the UI's `"all"` sentinel as "no filter".
    pub fn selection(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// One row of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayRecord {
    Prop(GroupedProp),
    Opportunity(Opportunity),
}

impl DisplayRecord {
    pub fn player(&self) -> &str {
        match self {
            Self::Prop(p) => &p.player,
            Self::Opportunity(o) => &o.subject().player,
        }
    }

    pub fn prop_type(&self) -> &str {
        match self {
            Self::Prop(p) => &p.prop_type,
            Self::Opportunity(o) => &o.subject().prop_type,
        }
    }

    pub fn best_book(&self) -> Option<&str> {
        match self {
            Self::Prop(_) => None,
            Self::Opportunity(o) => o.best_book(),
        }
    }

    /// Numeric key for [`SortKey::Value`]. Grouped props rank by the line
    /// gap between the reference books.
    pub fn ranking_key(&self) -> Option<f64> {
        match self {
            Self::Prop(p) => p.line_difference().filter(|v| v.is_finite()),
            Self::Opportunity(o) => o.ranking_key(),
        }
    }
}

/// Borrowed view of everything the pipeline may select from.
#[derive(Debug, Clone, Copy)]
pub struct Collections<'a> {
    pub props: &'a [GroupedProp],
    pub opportunities: &'a OpportunitySets,
}

impl<'a> Collections<'a> {
    fn base(&self, category: Category) -> Vec<DisplayRecord> {
        match category.opportunity_kind() {
            None => self.props.iter().cloned().map(DisplayRecord::Prop).collect(),
            Some(kind) => self
                .opportunities
                .of_kind(kind)
                .into_iter()
                .map(DisplayRecord::Opportunity)
                .collect(),
        }
    }
}

/// Build the ordered, filtered sequence for `category`.
pub fn view(
    category: Category,
    collections: Collections<'_>,
    favorites: &FavoritesIndex,
    criteria: &Criteria,
) -> Vec<DisplayRecord> {
    let needle = criteria.search_text.trim().to_lowercase();

    let mut records: Vec<DisplayRecord> = collections
        .base(category)
        .into_iter()
        .filter(|r| needle.is_empty() || r.player().to_lowercase().contains(&needle))
        .filter(|r| {
            criteria
                .prop_type
                .as_deref()
                .map_or(true, |wanted| r.prop_type() == wanted)
        })
        .filter(|r| !criteria.favorites_only || favorites.is_favorite(r.player(), r.prop_type()))
        .filter(|r| {
            if !category.has_best_book() {
                return true;
            }
            match criteria.sportsbook.as_deref() {
                None => true,
                Some(wanted) => r
                    .best_book()
                    .is_some_and(|book| book.eq_ignore_ascii_case(wanted)),
            }
        })
        .collect();

    match criteria.sort {
        Some(SortKey::Value) => records.sort_by(|a, b| rank_descending(a.ranking_key(), b.ranking_key())),
        Some(SortKey::Player) => records.sort_by_cached_key(|r| r.player().to_lowercase()),
        None => {}
    }

    records
}

fn rank_descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
