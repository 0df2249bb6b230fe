//! End-to-end checks of grouping plus the filter/sort pipeline.

use propedge::domain::{
    group, view, BookKey, Category, Collections, Criteria, DisplayRecord, FavoritesIndex,
    OddsEdge, OpportunitySets, Quote, Side, SortKey,
};
use propedge::testkit::domain::{arbitrage, best_odds, consensus, discrepancy, quote, value_bet};

fn players(records: &[DisplayRecord]) -> Vec<&str> {
    records.iter().map(DisplayRecord::player).collect()
}

fn sample_sets() -> OpportunitySets {
    OpportunitySets {
        arbitrage: vec![
            arbitrage("Jalen Brunson", "assists", 1.2),
            arbitrage("Anthony Davis", "rebounds", 3.4),
            arbitrage("Luka Doncic", "points", 2.1),
        ],
        value: vec![
            value_bet("LeBron James", "points", "FanDuel", 4.0),
            value_bet("Jayson Tatum", "points", "DraftKings", 6.5),
        ],
        consensus: vec![consensus("Jayson Tatum", "rebounds", "DraftKings", 30.0)],
        discrepancies: vec![discrepancy("LeBron James", "points", 25.5, 27.0)],
        best_odds: vec![
            best_odds("Jalen Brunson", "assists", "fanduel", 15.0),
            best_odds("Luka Doncic", "points", "draftkings", 40.0),
        ],
    }
}

#[test]
fn grouping_merges_books_for_the_same_player_prop() {
    let quotes = vec![
        quote("LeBron James", "points", "DraftKings", 25.5),
        Quote {
            over_odds: Some(-105),
            under_odds: Some(-115),
            ..quote("LeBron James", "points", "FanDuel", 26.5)
        },
    ];

    let props = group(&quotes);
    assert_eq!(props.len(), 1);
    let prop = &props[0];
    assert_eq!(prop.book_count(), 2);
    assert_eq!(prop.book(&BookKey::draftkings()).and_then(|q| q.line), Some(25.5));
    assert_eq!(prop.book(&BookKey::fanduel()).and_then(|q| q.line), Some(26.5));
    assert!(prop.line_mismatch());
    assert_eq!(prop.line_difference(), Some(1.0));
    assert_eq!(prop.odds_edge(Side::Over), Some(OddsEdge::Better(BookKey::fanduel())));
    assert_eq!(prop.odds_edge(Side::Under), Some(OddsEdge::Better(BookKey::draftkings())));
}

#[test]
fn player_sort_is_identity_on_sorted_input() {
    let props = group(&[
        quote("Anthony Davis", "rebounds", "draftkings", 11.5),
        quote("jalen Brunson", "assists", "draftkings", 7.5),
        quote("LeBron James", "points", "draftkings", 25.5),
    ]);
    let sets = OpportunitySets::default();
    let collections = Collections {
        props: &props,
        opportunities: &sets,
    };
    let criteria = Criteria {
        sort: Some(SortKey::Player),
        ..Criteria::default()
    };

    let records = view(Category::All, collections, &FavoritesIndex::new(), &criteria);
    assert_eq!(players(&records), ["Anthony Davis", "jalen Brunson", "LeBron James"]);
}

#[test]
fn no_filters_and_no_sort_returns_source_order() {
    let sets = sample_sets();
    let collections = Collections {
        props: &[],
        opportunities: &sets,
    };

    let records = view(Category::Arbitrage, collections, &FavoritesIndex::new(), &Criteria::default());
    assert_eq!(players(&records), ["Jalen Brunson", "Anthony Davis", "Luka Doncic"]);
}

#[test]
fn value_sort_ranks_by_category_metric() {
    let sets = sample_sets();
    let collections = Collections {
        props: &[],
        opportunities: &sets,
    };
    let criteria = Criteria {
        sort: Some(SortKey::Value),
        ..Criteria::default()
    };

    let arb = view(Category::Arbitrage, collections, &FavoritesIndex::new(), &criteria);
    assert_eq!(players(&arb), ["Anthony Davis", "Luka Doncic", "Jalen Brunson"]);

    let best = view(Category::BestOdds, collections, &FavoritesIndex::new(), &criteria);
    assert_eq!(players(&best), ["Luka Doncic", "Jalen Brunson"]);
}

#[test]
fn sportsbook_filter_only_applies_to_views_with_a_best_book() {
    let sets = sample_sets();
    let collections = Collections {
        props: &[],
        opportunities: &sets,
    };
    let criteria = Criteria {
        sportsbook: Some("fanduel".to_string()),
        ..Criteria::default()
    };
    let favorites = FavoritesIndex::new();

    let value = view(Category::Value, collections, &favorites, &criteria);
    assert_eq!(players(&value), ["LeBron James"]);

    let consensus = view(Category::Consensus, collections, &favorites, &criteria);
    assert!(consensus.is_empty());

    let best = view(Category::BestOdds, collections, &favorites, &criteria);
    assert_eq!(players(&best), ["Jalen Brunson"]);

    let arb = view(Category::Arbitrage, collections, &favorites, &criteria);
    assert_eq!(arb.len(), 3);
}

#[test]
fn filters_compose() {
    let sets = sample_sets();
    let collections = Collections {
        props: &[],
        opportunities: &sets,
    };
    let mut favorites = FavoritesIndex::new();
    favorites.toggle("Jayson Tatum", "points");
    favorites.toggle("LeBron James", "points");

    let criteria = Criteria {
        search_text: "  TATUM ".to_string(),
        prop_type: Some("points".to_string()),
        favorites_only: true,
        ..Criteria::default()
    };
    let records = view(Category::Value, collections, &favorites, &criteria);
    assert_eq!(players(&records), ["Jayson Tatum"]);
}

#[test]
fn view_does_not_mutate_inputs() {
    let sets = sample_sets();
    let before = sets.clone();
    let collections = Collections {
        props: &[],
        opportunities: &sets,
    };
    let criteria = Criteria {
        sort: Some(SortKey::Player),
        ..Criteria::default()
    };
    let _ = view(Category::Arbitrage, collections, &FavoritesIndex::new(), &criteria);
    assert_eq!(sets, before);
}
