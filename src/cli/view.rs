//! `propedge view`: fetch one date and print a filtered view.

use anyhow::bail;
use serde_json::json;

use super::{build_session, output, render, FilterArgs, ViewArgs};
use crate::app::{Config, RefreshOutcome, Session};
use crate::port::PropSource;

pub async fn execute(config: &Config, args: &ViewArgs) -> anyhow::Result<()> {
    let session = build_session(config)?;

    let outcome = match args.date.date {
        Some(date) => session.select_date(date).await,
        None => session.refresh().await,
    };
    if let RefreshOutcome::Failed(error) = outcome {
        bail!(error);
    }

    print_view(&session, &args.filters, config.stake.default_total);
    Ok(())
}

/// Print the current snapshot through the view pipeline.
pub fn print_view<S: PropSource>(session: &Session<S>, filters: &FilterArgs, total_stake: f64) {
    let mut records = session.view(filters.category, &filters.criteria());
    let matched = records.len();
    if let Some(limit) = filters.limit {
        records.truncate(limit);
    }
    let date = session
        .date()
        .map_or_else(|| "-".to_string(), |d| d.to_string());

    if output::is_json() {
        output::json_output(json!({
            "command": "view",
            "date": date,
            "category": filters.category.as_str(),
            "matched": matched,
            "records": records,
        }));
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Date", output::highlight(&date));
    output::field("View", filters.category);
    output::field("Source", session.source().source_name());

    if records.is_empty() {
        output::section("No matching records");
        if session.snapshot().is_empty() {
            output::note("The source returned no data for this date.");
        }
        return;
    }

    output::section(&format!("{} of {matched} records", records.len()));
    let favorites = session.favorites();
    output::lines(&render::table(&records, &favorites, total_stake));
}
