//! Builders for domain records used across tests.
//!
//! Keeps tests focused on assertions rather than struct literals.

use chrono::NaiveDate;

use crate::domain::{
    ArbitrageOpportunity, BestOddsPick, ConsensusBet, LineDiscrepancy, PropSubject, Quote, Side,
    ValueBet,
};

/// Parse a `YYYY-MM-DD` literal.
pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("valid ISO date literal")
}

pub fn subject(player: &str, prop_type: &str) -> PropSubject {
    PropSubject {
        player: player.to_string(),
        prop_type: prop_type.to_string(),
        game: Some("NYK @ BOS".to_string()),
        team: None,
    }
}

/// A quote with both sides at `-110`.
pub fn quote(player: &str, prop_type: &str, sportsbook: &str, line: f64) -> Quote {
    Quote {
        player: player.to_string(),
        prop_type: prop_type.to_string(),
        game: Some("NYK @ BOS".to_string()),
        team: None,
        sportsbook: sportsbook.to_string(),
        line: Some(line),
        over_odds: Some(-110),
        under_odds: Some(-110),
    }
}

pub fn arbitrage(player: &str, prop_type: &str, profit_percent: f64) -> ArbitrageOpportunity {
    ArbitrageOpportunity {
        subject: subject(player, prop_type),
        line: Some(20.5),
        over_odds: Some(120),
        under_odds: Some(-105),
        bet_over: "DraftKings".to_string(),
        bet_under: "FanDuel".to_string(),
        profit_percent: Some(profit_percent),
    }
}

pub fn value_bet(player: &str, prop_type: &str, best_book: &str, edge_percent: f64) -> ValueBet {
    ValueBet {
        subject: subject(player, prop_type),
        line: Some(20.5),
        recommended_side: Some(Side::Over),
        best_book: best_book.to_string(),
        best_odds: Some(115),
        edge_percent: Some(edge_percent),
        all_odds: None,
        reasoning: None,
    }
}

pub fn consensus(player: &str, prop_type: &str, best_book: &str, odds_difference: f64) -> ConsensusBet {
    ConsensusBet {
        subject: subject(player, prop_type),
        line: Some(20.5),
        side: Some(Side::Under),
        best_book: best_book.to_string(),
        best_odds: Some(-120),
        other_odds: Some(-145),
        odds_difference: Some(odds_difference),
        reasoning: None,
    }
}

pub fn discrepancy(player: &str, prop_type: &str, dk_line: f64, fd_line: f64) -> LineDiscrepancy {
    LineDiscrepancy {
        subject: subject(player, prop_type),
        dk_line: Some(dk_line),
        fd_line: Some(fd_line),
        dk_over: Some(-110),
        dk_under: Some(-110),
        fd_over: Some(-110),
        fd_under: Some(-110),
        line_difference: Some((dk_line - fd_line).abs()),
    }
}

pub fn best_odds(player: &str, prop_type: &str, best_book: &str, odds_difference: f64) -> BestOddsPick {
    BestOddsPick {
        subject: subject(player, prop_type),
        line: Some(20.5),
        side: Some(Side::Over),
        best_book: best_book.to_string(),
        best_odds: Some(105),
        other_odds: Some(-115),
        odds_difference: Some(odds_difference),
        dk_odds: Some(105),
        fd_odds: Some(-115),
    }
}
