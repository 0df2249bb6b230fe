//! Cross-book reconciliation of quotes into grouped props.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::favorites::FavoriteKey;
use super::quote::{BookKey, BookQuote, Quote, Side};

/// A (player, propType) with one entry per book that quotes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedProp {
    pub player: String,
    pub prop_type: String,
    pub game: Option<String>,
    pub team: Option<String>,
    books: BTreeMap<BookKey, BookQuote>,
}

/// Which book prices a side better.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OddsEdge {
    Better(BookKey),
    Even,
}

impl GroupedProp {
    fn seed(quote: &Quote) -> Self {
        Self {
            player: quote.player.clone(),
            prop_type: quote.prop_type.clone(),
            game: quote.game.clone(),
            team: quote.team.clone(),
            books: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> FavoriteKey {
        FavoriteKey::new(&self.player, &self.prop_type)
    }

    /// The quote from `book`, if that book lists this prop.
    pub fn book(&self, book: &BookKey) -> Option<&BookQuote> {
        self.books.get(book)
    }

    pub fn books(&self) -> impl Iterator<Item = (&BookKey, &BookQuote)> {
        self.books.iter()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    fn reference_pair(&self) -> Option<(&BookQuote, &BookQuote)> {
        Some((
            self.book(&BookKey::draftkings())?,
            self.book(&BookKey::fanduel())?,
        ))
    }

    /// Both reference books quote this prop at different lines.
    pub fn line_mismatch(&self) -> bool {
        match self.reference_pair() {
            Some((dk, fd)) => dk.line != fd.line,
            None => false,
        }
    }

    /// Absolute line gap between the reference books, when both lines exist.
    pub fn line_difference(&self) -> Option<f64> {
        let (dk, fd) = self.reference_pair()?;
        Some((dk.line? - fd.line?).abs())
    }

    /// Which reference book pays more on `side`.
    ///
    /// `None` means a book is missing or has no odds for that side, which is
    /// distinct from `Some(OddsEdge::Even)`.
    pub fn odds_edge(&self, side: Side) -> Option<OddsEdge> {
        let (dk, fd) = self.reference_pair()?;
        let (dk_odds, fd_odds) = (dk.odds(side)?, fd.odds(side)?);
        Some(match dk_odds.cmp(&fd_odds) {
            std::cmp::Ordering::Greater => OddsEdge::Better(BookKey::draftkings()),
            std::cmp::Ordering::Less => OddsEdge::Better(BookKey::fanduel()),
            std::cmp::Ordering::Equal => OddsEdge::Even,
        })
    }
}

/// Merge quotes sharing a (player, propType) into grouped props.
///
/// Output follows first-seen order. A later quote from the same book for
/// the same key replaces the earlier one.
pub fn group(quotes: &[Quote]) -> Vec<GroupedProp> {
    let mut index: HashMap<FavoriteKey, usize> = HashMap::new();
    let mut grouped: Vec<GroupedProp> = Vec::new();

    for quote in quotes {
        let key = FavoriteKey::new(&quote.player, &quote.prop_type);
        let slot = *index.entry(key).or_insert_with(|| {
            grouped.push(GroupedProp::seed(quote));
            grouped.len() - 1
        });
        grouped[slot]
            .books
            .insert(quote.book_key(), quote.book_quote());
    }

    grouped
}
