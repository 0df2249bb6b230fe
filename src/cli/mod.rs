//! Command-line interface definitions.

pub mod favorite;
pub mod output;
pub mod refresh;
pub mod render;
pub mod stake;
pub mod view;
pub mod watch;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::adapter::{HttpPropSource, JsonFavoritesStore};
use crate::app::{Config, Session};
use crate::domain::{AmericanOdds, Category, Criteria, SortKey};

/// Propedge - compare player-prop lines across sportsbooks.
#[derive(Parser, Debug)]
#[command(name = "propedge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value = "propedge.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit machine-readable JSON lines instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a date's data and print one view
    View(ViewArgs),

    /// Like `view`, re-rendered on every automatic refresh
    Watch(WatchArgs),

    /// Split a stake across both sides of a two-way bet
    Stake(StakeArgs),

    /// Manage favorite player props
    #[command(subcommand)]
    Favorite(FavoriteCommand),

    /// Re-scrape upstream, then fetch the date
    Refresh(DateArg),

    /// Print the source's default date
    Today,
}

/// Shared date selector.
#[derive(Args, Debug, Clone)]
pub struct DateArg {
    /// Date to load (YYYY-MM-DD); defaults to the source's current date
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortArg {
    /// Highest profit/edge/difference first
    #[default]
    Value,
    /// Player name A to Z
    Player,
    /// Keep the source's order
    None,
}

/// Filters applied by the view pipeline.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// View to show: all, arbitrage, value, consensus, discrepancies, best-odds
    #[arg(short = 'k', long, default_value = "all")]
    pub category: Category,

    /// Case-insensitive player name search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Prop type to keep (e.g. points), or "all"
    #[arg(long, default_value = "all")]
    pub prop_type: String,

    /// Best-book filter for value, consensus and best-odds views, or "all"
    #[arg(long, default_value = "all")]
    pub book: String,

    /// Only show favorite player props
    #[arg(long)]
    pub favorites: bool,

    #[arg(long, value_enum, default_value_t = SortArg::Value)]
    pub sort: SortArg,

    /// Show at most this many rows
    #[arg(long)]
    pub limit: Option<usize>,
}

impl FilterArgs {
    pub fn criteria(&self) -> Criteria {
        Criteria {
            search_text: self.search.clone(),
            prop_type: Criteria::selection(&self.prop_type),
            sportsbook: Criteria::selection(&self.book),
            favorites_only: self.favorites,
            sort: match self.sort {
                SortArg::Value => Some(SortKey::Value),
                SortArg::Player => Some(SortKey::Player),
                SortArg::None => None,
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    #[command(flatten)]
    pub date: DateArg,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub date: DateArg,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Override the refresh interval in seconds
    #[arg(long)]
    pub interval: Option<u64>,
}

#[derive(Args, Debug)]
pub struct StakeArgs {
    /// American odds for the over side (e.g. +150)
    #[arg(allow_hyphen_values = true)]
    pub over: AmericanOdds,

    /// American odds for the under side (e.g. -170)
    #[arg(allow_hyphen_values = true)]
    pub under: AmericanOdds,

    /// Total amount to stake; defaults to `stake.default_total`
    #[arg(short, long)]
    pub total: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommand {
    /// Mark or unmark a player prop
    Toggle {
        /// Player name exactly as the books list it
        player: String,
        /// Prop type (e.g. points)
        prop_type: String,
    },
    /// List favorites
    List,
}

/// Build a session against the configured dashboard API.
pub fn build_session(config: &Config) -> anyhow::Result<Session<HttpPropSource>> {
    let source = HttpPropSource::new(
        &config.source.api_url,
        config.source.timeout(),
        config.source.scrape_timeout(),
    )
    .context("failed to build HTTP client")?;
    let store = JsonFavoritesStore::new(config.favorites.resolved_path());
    Ok(Session::new(source, store))
}

/// Load configuration, initialize logging, and run the selected command.
pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    output::configure(output::OutputConfig { json: cli.json });

    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.init_logging();

    match &cli.command {
        Commands::View(args) => view::execute(&config, args).await,
        Commands::Watch(args) => watch::execute(&config, args).await,
        Commands::Stake(args) => stake::execute(&config, args),
        Commands::Favorite(command) => favorite::execute(&config, command),
        Commands::Refresh(args) => refresh::execute(&config, args).await,
        Commands::Today => refresh::today(&config).await,
    }
}
