//! American odds conversion and balanced two-way stake sizing.
//!
//! American odds are signed integers: `+150` pays 150 on a 100 stake,
//! `-150` needs a 150 stake to win 100. Zero is not a legal quote.

use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OddsError;

/// A validated, non-zero American odds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Validate a raw odds value.
    ///
    /// # Errors
    ///
    /// Returns `OddsError::InvalidOdds` for zero.
    pub fn new(value: i32) -> Result<Self, OddsError> {
        if value == 0 {
            return Err(OddsError::InvalidOdds("0".to_string()));
        }
        Ok(Self(value))
    }

    /// The raw signed value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Decimal payout multiplier (stake included).
    #[must_use]
    pub fn decimal(self) -> f64 {
        let v = f64::from(self.0);
        if self.0 > 0 {
            v / 100.0 + 1.0
        } else {
            100.0 / v.abs() + 1.0
        }
    }

    /// Implied win probability as a fraction in `(0, 1)`.
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        1.0 / self.decimal()
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = OddsError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for AmericanOdds {
    type Err = OddsError;

    /// Parses scraped odds text. Typographic minus signs and dashes are
    /// read as `-`, and a leading `+` is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '\u{2212}' | '\u{2013}' | '\u{2014}' => '-',
                other => other,
            })
            .collect();
        let value = normalized
            .parse::<i32>()
            .map_err(|_| OddsError::InvalidOdds(s.to_string()))?;
        Self::new(value)
    }
}

/// Odds as they appear in source records: a number, scraped text, or
/// something unusable.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOdds {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Field deserializer for optional odds.
///
/// Accepts integers, integral floats and odds text (`"+105"`, `"\u{2212}110"`).
/// Anything else decodes as `None` so the surrounding record survives.
pub fn lenient_odds<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawOdds>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawOdds::Integer(v)) => i32::try_from(v).ok(),
        Some(RawOdds::Float(v)) if v.is_finite() && v.fract() == 0.0 => {
            i32::try_from(v as i64).ok()
        }
        Some(RawOdds::Text(text)) => text.parse().ok().map(AmericanOdds::value),
        Some(RawOdds::Float(_) | RawOdds::Other(_)) | None => None,
    })
}

/// Decimal payout multiplier for a possibly-absent raw odds value.
///
/// # Errors
///
/// Returns `OddsError::InvalidOdds` when the value is absent or zero.
pub fn decimal_multiplier(american: Option<i32>) -> Result<f64, OddsError> {
    let raw = american.ok_or_else(|| OddsError::InvalidOdds("missing".to_string()))?;
    Ok(AmericanOdds::new(raw)?.decimal())
}

/// How a total stake divides across both sides of a two-outcome bet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StakeSplit {
    pub stake_over: f64,
    pub stake_under: f64,
    /// Guaranteed profit (may be negative when the pair is not an arbitrage).
    pub profit: f64,
}

impl StakeSplit {
    /// True when both stakes are zero, i.e. the inputs were unusable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stake_over == 0.0 && self.stake_under == 0.0
    }
}

/// Split `total_stake` so the payout is identical whichever side wins.
///
/// Missing or zero odds yield an all-zero split instead of an error, so
/// callers may invoke this before validating their inputs.
#[must_use]
pub fn stake_split(over: Option<i32>, under: Option<i32>, total_stake: f64) -> StakeSplit {
    match (decimal_multiplier(over), decimal_multiplier(under)) {
        (Ok(d_over), Ok(d_under)) => {
            let stake_over = total_stake / (1.0 + d_over / d_under);
            let stake_under = total_stake - stake_over;
            StakeSplit {
                stake_over,
                stake_under,
                profit: stake_over * d_over - total_stake,
            }
        }
        _ => StakeSplit::default(),
    }
}

/// Guaranteed profit percentage for betting both sides, or `None` when the
/// combined implied probability is not below 100%.
#[must_use]
pub fn arbitrage_profit_percent(over: AmericanOdds, under: AmericanOdds) -> Option<f64> {
    let total = over.implied_probability() + under.implied_probability();
    if total < 1.0 {
        Some(round2((1.0 / total - 1.0) * 100.0))
    } else {
        None
    }
}

/// Expected value of a unit bet as a percentage, given an estimated win
/// probability in percent.
#[must_use]
pub fn expected_value_percent(odds: AmericanOdds, true_probability_percent: f64) -> f64 {
    let p = true_probability_percent / 100.0;
    let ev = p * (odds.decimal() - 1.0) - (1.0 - p);
    round2(ev * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
