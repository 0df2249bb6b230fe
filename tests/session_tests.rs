//! Session behavior against a scripted source: batch atomicity, refresh
//! gating, stale-response handling, and favorites persistence.

use std::sync::Arc;

use propedge::adapter::MemoryFavoritesStore;
use propedge::app::{run_auto_refresh, RefreshOutcome, RefreshState, Session, Snapshot};
use propedge::domain::{Category, Criteria, DisplayRecord, FavoritesIndex, SortKey};
use propedge::error::SourceError;
use propedge::port::FavoritesStore;
use propedge::testkit::domain::{
    arbitrage, best_odds, consensus, date, discrepancy, quote, value_bet,
};
use propedge::testkit::scheduler::CountedScheduler;
use propedge::testkit::source::{Fixture, ScriptedSource};

fn full_fixture() -> Fixture {
    let mut fixture = Fixture {
        quotes: vec![
            quote("LeBron James", "points", "draftkings", 25.5),
            quote("LeBron James", "points", "fanduel", 26.5),
            quote("Jalen Brunson", "assists", "draftkings", 7.5),
        ],
        ..Fixture::default()
    };
    let sets = &mut fixture.opportunities;
    sets.arbitrage.push(arbitrage("Jalen Brunson", "assists", 1.8));
    sets.value.push(value_bet("LeBron James", "points", "FanDuel", 4.2));
    sets.consensus.push(consensus("Jayson Tatum", "rebounds", "DraftKings", 25.0));
    sets.discrepancies.push(discrepancy("LeBron James", "points", 25.5, 26.5));
    sets.best_odds.push(best_odds("Jalen Brunson", "assists", "FanDuel", 20.0));
    fixture
}

fn session_with(source: ScriptedSource) -> Session<ScriptedSource> {
    Session::new(source, MemoryFavoritesStore::new())
}

#[tokio::test]
async fn refresh_uses_source_default_date_and_loads_everything() {
    let today = date("2025-01-15");
    let session = session_with(ScriptedSource::new(today).with_fixture(today, full_fixture()));

    assert_eq!(session.refresh().await, RefreshOutcome::Applied);

    let snapshot = session.snapshot();
    assert_eq!(session.date(), Some(today));
    assert_eq!(snapshot.date, Some(today));
    assert_eq!(snapshot.quotes.len(), 3);
    assert_eq!(snapshot.props.len(), 2);
    assert_eq!(snapshot.opportunities.len(), 5);
    assert!(session.error().is_none());
    assert_eq!(session.refresh_state(), RefreshState::Idle);
}

#[tokio::test]
async fn one_failing_read_empties_every_collection() {
    let today = date("2025-01-15");
    let source = ScriptedSource::new(today).with_fixture(today, full_fixture());
    let session = session_with(source);
    assert_eq!(session.refresh().await, RefreshOutcome::Applied);

    session.source().fail_endpoint("value-bets");
    let outcome = session.refresh().await;

    let RefreshOutcome::Failed(SourceError::Unavailable { endpoint, .. }) = &outcome else {
        panic!("expected a source-unavailable failure, got {outcome:?}");
    };
    assert_eq!(endpoint, "value-bets");

    let snapshot = session.snapshot();
    assert_eq!(snapshot, Snapshot::empty(today));
    assert!(snapshot.quotes.is_empty());
    assert!(snapshot.props.is_empty());
    assert!(snapshot.opportunities.is_empty());
    assert!(matches!(session.error(), Some(SourceError::Unavailable { .. })));
    for category in Category::ALL {
        assert!(session.view(category, &Criteria::default()).is_empty());
    }
}

#[tokio::test]
async fn success_after_failure_clears_the_error() {
    let today = date("2025-01-15");
    let source = ScriptedSource::new(today).with_fixture(today, full_fixture());
    source.fail_endpoint("props");
    let session = session_with(source);

    assert!(matches!(session.refresh().await, RefreshOutcome::Failed(_)));
    assert!(session.error().is_some());

    session.source().clear_failures();
    assert_eq!(session.refresh().await, RefreshOutcome::Applied);
    assert!(session.error().is_none());
    assert_eq!(session.snapshot().props.len(), 2);
}

#[tokio::test]
async fn failed_rescrape_keeps_the_previous_snapshot() {
    let today = date("2025-01-15");
    let source = ScriptedSource::new(today).with_fixture(today, full_fixture());
    let session = session_with(source);
    assert_eq!(session.refresh().await, RefreshOutcome::Applied);
    let before = session.snapshot();

    session.source().fail_refresh("scraper timed out");
    let outcome = session.full_refresh().await;

    assert!(matches!(outcome, RefreshOutcome::Failed(SourceError::RefreshFailed(_))));
    assert_eq!(session.snapshot(), before);
    assert!(matches!(session.error(), Some(SourceError::RefreshFailed(_))));
    assert_eq!(session.refresh_state(), RefreshState::Idle);
}

#[tokio::test]
async fn successful_rescrape_serves_new_data() {
    let today = date("2025-01-15");
    let source = ScriptedSource::new(today).with_fixture(today, Fixture::default());
    source.stage_after_refresh(today, full_fixture());
    let session = session_with(source);

    assert_eq!(session.full_refresh().await, RefreshOutcome::Applied);
    assert_eq!(session.source().trigger_count(), 1);
    assert_eq!(session.snapshot().opportunities.len(), 5);
}

#[tokio::test]
async fn scheduled_refresh_is_skipped_while_scraping() {
    let today = date("2025-01-15");
    let source = ScriptedSource::new(today).with_fixture(today, full_fixture());
    let release = source.hold_refresh();
    let session = Arc::new(session_with(source));

    let scraping = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.full_refresh().await })
    };
    while session.refresh_state() != RefreshState::Scraping {
        tokio::task::yield_now().await;
    }

    assert_eq!(session.refresh().await, RefreshOutcome::Skipped);
    assert_eq!(session.source().batch_count(), 0);

    release.notify_one();
    assert_eq!(scraping.await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(session.source().batch_count(), 1);
    assert_eq!(session.refresh_state(), RefreshState::Idle);
}

#[tokio::test]
async fn older_generation_is_discarded() {
    let today = date("2025-01-15");
    let session = session_with(ScriptedSource::new(today));
    session.set_date(today);

    let older = session.begin_fetch(today);
    let newer = session.begin_fetch(today);

    let quotes = vec![quote("A", "points", "draftkings", 10.5)];
    let fresh = Snapshot::new(today, quotes, Default::default());
    assert_eq!(session.complete_fetch(newer, Ok(fresh.clone())), RefreshOutcome::Applied);

    let late = Snapshot::new(today, vec![], Default::default());
    assert_eq!(session.complete_fetch(older, Ok(late)), RefreshOutcome::Stale);
    assert_eq!(session.snapshot(), fresh);
}

#[tokio::test]
async fn older_fetch_finishing_first_is_still_discarded() {
    let today = date("2025-01-15");
    let session = session_with(ScriptedSource::new(today));
    session.set_date(today);

    let older = session.begin_fetch(today);
    let _newer = session.begin_fetch(today);

    let quotes = vec![quote("A", "points", "draftkings", 10.5)];
    let late = Snapshot::new(today, quotes, Default::default());
    assert_eq!(session.complete_fetch(older, Ok(late)), RefreshOutcome::Stale);
    assert_eq!(session.snapshot(), Snapshot::empty(today));
}

#[tokio::test]
async fn response_for_a_previous_date_is_discarded() {
    let monday = date("2025-01-13");
    let tuesday = date("2025-01-14");
    let session = session_with(ScriptedSource::new(monday));

    session.set_date(monday);
    let ticket = session.begin_fetch(monday);
    session.set_date(tuesday);

    let quotes = vec![quote("A", "points", "draftkings", 10.5)];
    let late = Snapshot::new(monday, quotes, Default::default());
    assert_eq!(session.complete_fetch(ticket, Ok(late)), RefreshOutcome::Stale);
    assert_eq!(session.snapshot(), Snapshot::empty(tuesday));
}

#[tokio::test]
async fn selecting_a_date_replaces_the_snapshot() {
    let monday = date("2025-01-13");
    let tuesday = date("2025-01-14");
    let source = ScriptedSource::new(monday)
        .with_fixture(monday, full_fixture())
        .with_fixture(
            tuesday,
            Fixture {
                quotes: vec![quote("Luka Doncic", "points", "fanduel", 33.5)],
                ..Fixture::default()
            },
        );
    let session = session_with(source);

    assert_eq!(session.refresh().await, RefreshOutcome::Applied);
    assert_eq!(session.snapshot().props.len(), 2);

    assert_eq!(session.select_date(tuesday).await, RefreshOutcome::Applied);
    let snapshot = session.snapshot();
    assert_eq!(session.date(), Some(tuesday));
    assert_eq!(snapshot.props.len(), 1);
    assert_eq!(snapshot.props[0].player, "Luka Doncic");
    assert!(snapshot.opportunities.is_empty());
}

#[tokio::test]
async fn auto_refresh_runs_once_per_tick() {
    let today = date("2025-01-15");
    let source = ScriptedSource::new(today).with_fixture(today, full_fixture());
    let session = Arc::new(session_with(source));

    let mut outcomes = Vec::new();
    run_auto_refresh(Arc::clone(&session), CountedScheduler::new(3), |_, outcome| {
        outcomes.push(outcome.clone());
    })
    .await;

    assert_eq!(outcomes, vec![RefreshOutcome::Applied; 3]);
    assert_eq!(session.source().batch_count(), 3);
}

#[tokio::test]
async fn unreachable_today_endpoint_surfaces_an_error() {
    let source = ScriptedSource::new(date("2025-01-15"));
    source.fail_endpoint("today");
    let session = session_with(source);

    let outcome = session.refresh().await;
    assert!(matches!(
        outcome,
        RefreshOutcome::Failed(SourceError::Unavailable { ref endpoint, .. }) if endpoint == "today"
    ));
    assert_eq!(session.date(), None);
}

#[tokio::test]
async fn favorites_filter_and_persistence() {
    let today = date("2025-01-15");
    let source = ScriptedSource::new(today).with_fixture(today, full_fixture());
    let store = Arc::new(MemoryFavoritesStore::new());
    let session = Session::new(source, SharedStore(Arc::clone(&store)));
    session.refresh().await;

    assert!(session.toggle_favorite("LeBron James", "points"));
    assert!(session.is_favorite("LeBron James", "points"));
    assert_eq!(store.snapshot().len(), 1);

    let criteria = Criteria {
        favorites_only: true,
        sort: Some(SortKey::Player),
        ..Criteria::default()
    };
    let records = session.view(Category::All, &criteria);
    assert_eq!(records.len(), 1);
    assert!(matches!(&records[0], DisplayRecord::Prop(p) if p.player == "LeBron James"));

    let value = session.view(Category::Value, &criteria);
    assert_eq!(value.len(), 1);
    assert!(session.view(Category::Arbitrage, &criteria).is_empty());

    assert!(!session.toggle_favorite("LeBron James", "points"));
    assert!(store.snapshot().is_empty());
    assert!(session.view(Category::All, &criteria).is_empty());
}

#[tokio::test]
async fn saved_favorites_are_loaded_on_start() {
    let mut saved = FavoritesIndex::new();
    saved.toggle("Jalen Brunson", "assists");
    let session = Session::new(
        ScriptedSource::new(date("2025-01-15")),
        MemoryFavoritesStore::with(saved),
    );
    assert!(session.is_favorite("Jalen Brunson", "assists"));
    assert_eq!(session.favorites().len(), 1);
}

/// Lets the test inspect a store the session owns.
struct SharedStore(Arc<MemoryFavoritesStore>);

impl FavoritesStore for SharedStore {
    fn load(&self) -> propedge::error::Result<FavoritesIndex> {
        self.0.load()
    }

    fn save(&self, favorites: &FavoritesIndex) -> propedge::error::Result<()> {
        self.0.save(favorites)
    }
}
