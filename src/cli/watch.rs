//! `propedge watch`: keep a view on screen, refreshing on a timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::info;

use super::{build_session, output, view::print_view, WatchArgs};
use crate::adapter::IntervalScheduler;
use crate::app::{run_auto_refresh, Config, RefreshOutcome};

pub async fn execute(config: &Config, args: &WatchArgs) -> anyhow::Result<()> {
    let session = Arc::new(build_session(config)?);
    let total_stake = config.stake.default_total;

    let first = match args.date.date {
        Some(date) => session.select_date(date).await,
        None => session.refresh().await,
    };
    if let RefreshOutcome::Failed(error) = &first {
        output::error(&error.to_string());
    }
    print_view(&session, &args.filters, total_stake);

    let period = match args.interval {
        Some(secs) if secs > 0 => Duration::from_secs(secs),
        Some(_) => anyhow::bail!("--interval must be at least 1 second"),
        None if config.refresh.enabled => config.refresh.interval(),
        None => {
            output::note("Automatic refresh is disabled in the configuration.");
            return Ok(());
        }
    };
    info!(interval_secs = period.as_secs(), "Watching for updates");

    let filters = args.filters.clone();
    let refresher = run_auto_refresh(
        Arc::clone(&session),
        IntervalScheduler::new(period),
        move |session, outcome| match outcome {
            RefreshOutcome::Applied => print_view(session, &filters, total_stake),
            RefreshOutcome::Failed(error) => {
                output::warning(&format!("Refresh failed, retrying next interval: {error}"));
            }
            RefreshOutcome::Skipped | RefreshOutcome::Stale => {}
        },
    );

    tokio::select! {
        () = refresher => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
    Ok(())
}
