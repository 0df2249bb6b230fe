//! `propedge stake`: balanced two-way stake calculator.

use serde_json::json;

use super::{output, render, StakeArgs};
use crate::app::Config;
use crate::domain::odds::{arbitrage_profit_percent, stake_split};

pub fn execute(config: &Config, args: &StakeArgs) -> anyhow::Result<()> {
    let total = args.total.unwrap_or(config.stake.default_total);
    if !total.is_finite() || total <= 0.0 {
        anyhow::bail!("total stake must be a positive number, got {total}");
    }

    let split = stake_split(Some(args.over.value()), Some(args.under.value()), total);
    let arbitrage = arbitrage_profit_percent(args.over, args.under);

    if output::is_json() {
        output::json_output(json!({
            "command": "stake",
            "over_odds": args.over.value(),
            "under_odds": args.under.value(),
            "total_stake": total,
            "stake_over": split.stake_over,
            "stake_under": split.stake_under,
            "profit": split.profit,
            "arbitrage_percent": arbitrage,
        }));
        return Ok(());
    }

    output::section("Stake split");
    output::field("Over", format!("{} -> ${:.2}", args.over, split.stake_over));
    output::field("Under", format!("{} -> ${:.2}", args.under, split.stake_under));
    output::field("Total", format!("${total:.2}"));
    output::field("Profit", render::profit(split.profit));
    match arbitrage {
        Some(pct) => output::success(&format!("Arbitrage: {pct:.2}% guaranteed")),
        None => output::note("No arbitrage at these prices."),
    }
    Ok(())
}
