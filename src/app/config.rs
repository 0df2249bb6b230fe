//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section is optional; the
//! `PROPEDGE_API_URL` environment variable overrides `source.api_url`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Environment variable overriding the dashboard API URL.
pub const API_URL_ENV: &str = "PROPEDGE_API_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub stake: StakeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream dashboard API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Timeout for ordinary reads, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout for the re-scrape trigger, in seconds.
    #[serde(default = "default_scrape_timeout_secs")]
    pub scrape_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_scrape_timeout_secs() -> u64 {
    600
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            scrape_timeout_secs: default_scrape_timeout_secs(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.scrape_timeout_secs)
    }
}

/// Automatic refresh settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_interval_secs() -> u64 {
    300
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_interval_secs(),
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Where favorites are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FavoritesConfig {
    /// Defaults to `<data dir>/propedge/favorites.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl FavoritesConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("propedge")
                .join("favorites.json")
        })
    }
}

/// Stake sizing shown next to arbitrage rows.
#[derive(Debug, Clone, Deserialize)]
pub struct StakeConfig {
    #[serde(default = "default_total_stake")]
    pub default_total: f64,
}

const fn default_total_stake() -> f64 {
    100.0
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            default_total: default_total_stake(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse TOML text, apply environment overrides, and validate.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.source.api_url = url;
            }
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.source.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.source.scrape_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scrape_timeout_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        let total = self.stake.default_total;
        if !total.is_finite() || total <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "default_total",
                reason: format!("must be a positive amount, got {total}"),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
            _ => {
                fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
        }
    }
}
