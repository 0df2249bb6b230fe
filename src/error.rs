use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors reported by the upstream data source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// One of the batch reads failed; the whole batch is discarded.
    #[error("source unavailable ({endpoint}): {reason}")]
    Unavailable { endpoint: String, reason: String },

    /// The upstream re-scrape trigger failed. The prior snapshot stays valid.
    #[error("refresh failed: {0}")]
    RefreshFailed(String),
}

/// Odds conversion errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OddsError {
    #[error("invalid American odds: {0}")]
    InvalidOdds(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Odds(#[from] OddsError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Convert any error raised while reading `endpoint` into the batch-level
    /// `SourceUnavailable` kind.
    pub fn into_unavailable(self, endpoint: &str) -> SourceError {
        match self {
            Error::Source(err @ SourceError::Unavailable { .. }) => err,
            other => SourceError::Unavailable {
                endpoint: endpoint.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_passes_through_unchanged() {
        let err = Error::from(SourceError::Unavailable {
            endpoint: "props".into(),
            reason: "500".into(),
        });
        assert_eq!(
            err.into_unavailable("arbitrage"),
            SourceError::Unavailable {
                endpoint: "props".into(),
                reason: "500".into(),
            }
        );
    }

    #[test]
    fn other_errors_become_unavailable() {
        let err = Error::from(std::io::Error::other("boom"));
        match err.into_unavailable("value-bets") {
            SourceError::Unavailable { endpoint, reason } => {
                assert_eq!(endpoint, "value-bets");
                assert!(reason.contains("boom"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
