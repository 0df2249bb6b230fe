//! Source-agnostic domain logic: odds math, grouping, favorites and views.

pub mod favorites;
pub mod odds;
pub mod opportunity;
pub mod prop;
pub mod quote;
pub mod view;

pub use favorites::{FavoriteKey, FavoritesIndex};
pub use odds::{decimal_multiplier, stake_split, AmericanOdds, StakeSplit};
pub use opportunity::{
    ArbitrageOpportunity, BestOddsPick, BookOddsSnapshot, ConsensusBet, LineDiscrepancy,
    Opportunity, OpportunityKind, OpportunitySets, PropSubject, ValueBet,
};
pub use prop::{group, GroupedProp, OddsEdge};
pub use quote::{BookKey, BookQuote, Quote, Side};
pub use view::{view, Category, Collections, Criteria, DisplayRecord, SortKey};
