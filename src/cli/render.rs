//! Table rendering for view records.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{
    ArbitrageOpportunity, BestOddsPick, BookKey, BookQuote, ConsensusBet, DisplayRecord,
    FavoritesIndex, GroupedProp, LineDiscrepancy, OddsEdge, Opportunity, Side, ValueBet,
};

const MISSING: &str = "-";

fn odds(value: Option<i32>) -> String {
    match value {
        Some(v) if v > 0 => format!("+{v}"),
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    }
}

fn line(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v}"))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.2}%"))
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.1}"))
}

fn side(value: Option<Side>) -> String {
    value.map_or_else(|| MISSING.to_string(), |s| s.to_string())
}

fn star(favorites: &FavoritesIndex, player: &str, prop_type: &str) -> &'static str {
    if favorites.is_favorite(player, prop_type) {
        "★"
    } else {
        ""
    }
}

fn edge(prop: &GroupedProp, side: Side) -> String {
    match prop.odds_edge(side) {
        Some(OddsEdge::Better(book)) => book.to_string(),
        Some(OddsEdge::Even) => "even".to_string(),
        None => MISSING.to_string(),
    }
}

#[derive(Tabled)]
struct PropRow {
    #[tabled(rename = "★")]
    star: &'static str,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop_type: String,
    #[tabled(rename = "DK Line")]
    dk_line: String,
    #[tabled(rename = "DK O/U")]
    dk_odds: String,
    #[tabled(rename = "FD Line")]
    fd_line: String,
    #[tabled(rename = "FD O/U")]
    fd_odds: String,
    #[tabled(rename = "Mismatch")]
    mismatch: &'static str,
    #[tabled(rename = "Best Over")]
    best_over: String,
    #[tabled(rename = "Best Under")]
    best_under: String,
}

impl PropRow {
    fn new(prop: &GroupedProp, favorites: &FavoritesIndex) -> Self {
        let dk = prop.book(&BookKey::draftkings());
        let fd = prop.book(&BookKey::fanduel());
        let pair = |q: Option<&BookQuote>| match q {
            Some(q) => format!("{}/{}", odds(q.over_odds), odds(q.under_odds)),
            None => MISSING.to_string(),
        };
        Self {
            star: star(favorites, &prop.player, &prop.prop_type),
            player: prop.player.clone(),
            prop_type: prop.prop_type.clone(),
            dk_line: line(dk.and_then(|q| q.line)),
            dk_odds: pair(dk),
            fd_line: line(fd.and_then(|q| q.line)),
            fd_odds: pair(fd),
            mismatch: if prop.line_mismatch() { "yes" } else { "" },
            best_over: edge(prop, Side::Over),
            best_under: edge(prop, Side::Under),
        }
    }
}

#[derive(Tabled)]
struct ArbitrageRow {
    #[tabled(rename = "★")]
    star: &'static str,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop_type: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Over")]
    over: String,
    #[tabled(rename = "Under")]
    under: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Stake Over")]
    stake_over: String,
    #[tabled(rename = "Stake Under")]
    stake_under: String,
}

impl ArbitrageRow {
    fn new(o: &ArbitrageOpportunity, favorites: &FavoritesIndex, total_stake: f64) -> Self {
        let split = o.stake_split(total_stake);
        let (stake_over, stake_under) = if split.is_empty() {
            (MISSING.to_string(), MISSING.to_string())
        } else {
            (
                format!("${:.2}", split.stake_over),
                format!("${:.2}", split.stake_under),
            )
        };
        Self {
            star: star(favorites, &o.subject.player, &o.subject.prop_type),
            player: o.subject.player.clone(),
            prop_type: o.subject.prop_type.clone(),
            line: line(o.line),
            over: format!("{} @ {}", odds(o.over_odds), o.bet_over),
            under: format!("{} @ {}", odds(o.under_odds), o.bet_under),
            profit: percent(o.profit_percent),
            stake_over,
            stake_under,
        }
    }
}

#[derive(Tabled)]
struct ValueRow {
    #[tabled(rename = "★")]
    star: &'static str,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop_type: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Reasoning")]
    reasoning: String,
}

impl ValueRow {
    fn new(o: &ValueBet, favorites: &FavoritesIndex) -> Self {
        Self {
            star: star(favorites, &o.subject.player, &o.subject.prop_type),
            player: o.subject.player.clone(),
            prop_type: o.subject.prop_type.clone(),
            line: line(o.line),
            side: side(o.recommended_side),
            book: o.best_book.clone(),
            odds: odds(o.best_odds),
            edge: percent(o.edge_percent),
            reasoning: o.reasoning.clone().unwrap_or_default(),
        }
    }
}

/// Shared shape for consensus and best-odds picks.
#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "★")]
    star: &'static str,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop_type: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Other")]
    other: String,
    #[tabled(rename = "Diff")]
    difference: String,
}

impl PickRow {
    fn consensus(o: &ConsensusBet, favorites: &FavoritesIndex) -> Self {
        Self {
            star: star(favorites, &o.subject.player, &o.subject.prop_type),
            player: o.subject.player.clone(),
            prop_type: o.subject.prop_type.clone(),
            line: line(o.line),
            side: side(o.side),
            book: o.best_book.clone(),
            best: odds(o.best_odds),
            other: odds(o.other_odds),
            difference: number(o.odds_difference),
        }
    }

    fn best_odds(o: &BestOddsPick, favorites: &FavoritesIndex) -> Self {
        Self {
            star: star(favorites, &o.subject.player, &o.subject.prop_type),
            player: o.subject.player.clone(),
            prop_type: o.subject.prop_type.clone(),
            line: line(o.line),
            side: side(o.side),
            book: o.best_book.clone(),
            best: odds(o.best_odds),
            other: odds(o.other_odds),
            difference: number(o.odds_difference),
        }
    }
}

#[derive(Tabled)]
struct DiscrepancyRow {
    #[tabled(rename = "★")]
    star: &'static str,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop_type: String,
    #[tabled(rename = "DK Line")]
    dk_line: String,
    #[tabled(rename = "DK O/U")]
    dk_odds: String,
    #[tabled(rename = "FD Line")]
    fd_line: String,
    #[tabled(rename = "FD O/U")]
    fd_odds: String,
    #[tabled(rename = "Diff")]
    difference: String,
}

impl DiscrepancyRow {
    fn new(o: &LineDiscrepancy, favorites: &FavoritesIndex) -> Self {
        Self {
            star: star(favorites, &o.subject.player, &o.subject.prop_type),
            player: o.subject.player.clone(),
            prop_type: o.subject.prop_type.clone(),
            dk_line: line(o.dk_line),
            dk_odds: format!("{}/{}", odds(o.dk_over), odds(o.dk_under)),
            fd_line: line(o.fd_line),
            fd_odds: format!("{}/{}", odds(o.fd_over), odds(o.fd_under)),
            difference: number(o.line_difference),
        }
    }
}

fn styled<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render records as one table.
///
/// Records are expected to come from a single view, so they share a
/// shape. The table takes the shape of the first record.
pub fn table(records: &[DisplayRecord], favorites: &FavoritesIndex, total_stake: f64) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    match first {
        DisplayRecord::Prop(_) => styled(
            records
                .iter()
                .filter_map(|r| match r {
                    DisplayRecord::Prop(p) => Some(PropRow::new(p, favorites)),
                    DisplayRecord::Opportunity(_) => None,
                })
                .collect(),
        ),
        DisplayRecord::Opportunity(Opportunity::Arbitrage(_)) => styled(
            opportunities(records)
                .filter_map(|o| match o {
                    Opportunity::Arbitrage(a) => {
                        Some(ArbitrageRow::new(a, favorites, total_stake))
                    }
                    _ => None,
                })
                .collect(),
        ),
        DisplayRecord::Opportunity(Opportunity::Value(_)) => styled(
            opportunities(records)
                .filter_map(|o| match o {
                    Opportunity::Value(v) => Some(ValueRow::new(v, favorites)),
                    _ => None,
                })
                .collect(),
        ),
        DisplayRecord::Opportunity(Opportunity::Consensus(_) | Opportunity::BestOdds(_)) => {
            styled(
                opportunities(records)
                    .filter_map(|o| match o {
                        Opportunity::Consensus(c) => Some(PickRow::consensus(c, favorites)),
                        Opportunity::BestOdds(b) => Some(PickRow::best_odds(b, favorites)),
                        _ => None,
                    })
                    .collect(),
            )
        }
        DisplayRecord::Opportunity(Opportunity::Discrepancy(_)) => styled(
            opportunities(records)
                .filter_map(|o| match o {
                    Opportunity::Discrepancy(d) => Some(DiscrepancyRow::new(d, favorites)),
                    _ => None,
                })
                .collect(),
        ),
    }
}

fn opportunities(records: &[DisplayRecord]) -> impl Iterator<Item = &Opportunity> {
    records.iter().filter_map(|r| match r {
        DisplayRecord::Opportunity(o) => Some(o),
        DisplayRecord::Prop(_) => None,
    })
}

/// Colored one-line summary of a stake split.
pub fn profit(value: f64) -> String {
    output::signed(value, format!("${value:.2}"))
}
