//! `propedge refresh` and `propedge today`.

use anyhow::bail;
use serde_json::json;

use super::{build_session, output, DateArg};
use crate::app::{Config, RefreshOutcome};
use crate::port::PropSource;

/// Trigger an upstream re-scrape, then fetch and summarize the date.
pub async fn execute(config: &Config, args: &DateArg) -> anyhow::Result<()> {
    let session = build_session(config)?;
    if let Some(date) = args.date {
        session.set_date(date);
    }

    if !output::is_json() {
        output::note("Re-scraping upstream books, this can take several minutes...");
    }
    let outcome = session.full_refresh().await;
    if let RefreshOutcome::Failed(error) = outcome {
        bail!(error);
    }

    let snapshot = session.snapshot();
    let sets = &snapshot.opportunities;
    let date = snapshot.date.map(|d| d.to_string()).unwrap_or_default();

    if output::is_json() {
        output::json_output(json!({
            "command": "refresh",
            "date": date,
            "quotes": snapshot.quotes.len(),
            "props": snapshot.props.len(),
            "arbitrage": sets.arbitrage.len(),
            "value": sets.value.len(),
            "consensus": sets.consensus.len(),
            "discrepancies": sets.discrepancies.len(),
            "best_odds": sets.best_odds.len(),
        }));
        return Ok(());
    }

    output::success(&format!("Refreshed {date}"));
    output::field("Quotes", snapshot.quotes.len());
    output::field("Props", snapshot.props.len());
    output::field("Arbitrage", sets.arbitrage.len());
    output::field("Value", sets.value.len());
    output::field("Consensus", sets.consensus.len());
    output::field("Discrepancies", sets.discrepancies.len());
    output::field("Best odds", sets.best_odds.len());
    Ok(())
}

/// Print the source's default date.
pub async fn today(config: &Config) -> anyhow::Result<()> {
    let session = build_session(config)?;
    let date = session.source().today().await?;

    if output::is_json() {
        output::json_output(json!({ "command": "today", "date": date.to_string() }));
    } else {
        println!("{date}");
    }
    Ok(())
}
