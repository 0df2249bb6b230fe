//! Raw per-book quotes as ingested from the data source.

use std::fmt;

use serde::{Deserialize, Serialize};

/// DraftKings canonical book key.
pub const DRAFTKINGS: &str = "draftkings";
/// FanDuel canonical book key.
pub const FANDUEL: &str = "fanduel";

/// Case-folded sportsbook identity (`"DraftKings"` and `"draftkings"` are
/// the same book).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BookKey(String);

impl BookKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn draftkings() -> Self {
        Self(DRAFTKINGS.to_string())
    }

    pub fn fanduel() -> Self {
        Self(FANDUEL.to_string())
    }
}

impl From<String> for BookKey {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<&str> for BookKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<BookKey> for String {
    fn from(key: BookKey) -> Self {
        key.0
    }
}

impl fmt::Display for BookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One sportsbook's line for one player/prop/game.
///
/// Fields the source omits stay absent instead of failing the whole
/// quote set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub prop_type: String,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub sportsbook: String,
    #[serde(default)]
    pub line: Option<f64>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub over_odds: Option<i32>,
    #[serde(default, deserialize_with = "crate::domain::odds::lenient_odds")]
    pub under_odds: Option<i32>,
}

impl Quote {
    pub fn book_key(&self) -> BookKey {
        BookKey::new(&self.sportsbook)
    }

    pub fn book_quote(&self) -> BookQuote {
        BookQuote {
            line: self.line,
            over_odds: self.over_odds,
            under_odds: self.under_odds,
        }
    }
}

/// The price a single book offers for a grouped prop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BookQuote {
    pub line: Option<f64>,
    pub over_odds: Option<i32>,
    pub under_odds: Option<i32>,
}

/// Over or under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "Over", alias = "OVER")]
    Over,
    #[serde(alias = "Under", alias = "UNDER")]
    Under,
}

impl BookQuote {
    pub fn odds(&self, side: Side) -> Option<i32> {
        match side {
            Side::Over => self.over_odds,
            Side::Under => self.under_odds,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Over => f.write_str("Over"),
            Side::Under => f.write_str("Under"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_key_folds_case_and_whitespace() {
        assert_eq!(BookKey::new(" DraftKings"), BookKey::draftkings());
        assert_eq!(BookKey::from("FANDUEL"), BookKey::fanduel());
    }

    #[test]
    fn quote_tolerates_missing_fields() {
        let quote: Quote = serde_json::from_str(
            r#"{"player":"Jalen Brunson","prop_type":"points","sportsbook":"FanDuel","line":27.5}"#,
        )
        .unwrap();
        assert_eq!(quote.book_key().as_str(), "fanduel");
        assert_eq!(quote.over_odds, None);
        assert_eq!(quote.game, None);
    }

    #[test]
    fn side_accepts_display_casing() {
        assert_eq!(serde_json::from_str::<Side>(r#""Over""#).unwrap(), Side::Over);
        assert_eq!(serde_json::from_str::<Side>(r#""under""#).unwrap(), Side::Under);
    }
}
