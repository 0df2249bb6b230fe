//! Dashboard REST API client.
//!
//! Reads quotes and the five opportunity collections from the dashboard
//! API and triggers its re-scrape endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::opportunity::decode_records;
use crate::domain::{
    ArbitrageOpportunity, BestOddsPick, ConsensusBet, LineDiscrepancy, Quote, ValueBet,
};
use crate::error::{Result, SourceError};
use crate::port::PropSource;

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
}

/// HTTP implementation of [`PropSource`].
pub struct HttpPropSource {
    client: Client,
    base_url: String,
    scrape_timeout: Duration,
}

impl HttpPropSource {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:5000`).
    ///
    /// `timeout` bounds ordinary reads; `scrape_timeout` bounds the
    /// re-scrape trigger, which can take much longer.
    pub fn new(base_url: &str, timeout: Duration, scrape_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            scrape_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "Fetching");

        let response = self.client.get(&url).send().await?;
        read_status(endpoint, response.status())?;
        Ok(response.json().await?)
    }

    async fn get_records<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        date: NaiveDate,
    ) -> Result<Vec<T>> {
        let values: Vec<serde_json::Value> =
            self.get_json(endpoint, &format!("{endpoint}/{}", date_key(date))).await?;
        let records = decode_records(endpoint, values);
        debug!(endpoint, %date, count = records.len(), "Fetched records");
        Ok(records)
    }
}

/// Any non-2xx read makes the endpoint unavailable.
fn read_status(endpoint: &str, status: StatusCode) -> std::result::Result<(), SourceError> {
    if status.is_success() {
        return Ok(());
    }
    Err(SourceError::Unavailable {
        endpoint: endpoint.to_string(),
        reason: format!("HTTP {status}"),
    })
}

/// The trigger succeeds on any 2xx (the dashboard answers 202 while the
/// scrape runs).
fn trigger_status(status: StatusCode, body: &str) -> std::result::Result<(), SourceError> {
    if status.is_success() {
        return Ok(());
    }
    Err(SourceError::RefreshFailed(format!("HTTP {status}: {}", body.trim())))
}

/// ISO `YYYY-MM-DD` key used in API paths.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl PropSource for HttpPropSource {
    async fn today(&self) -> Result<NaiveDate> {
        let response: TodayResponse = self.get_json("today", "today").await?;
        NaiveDate::parse_from_str(&response.date, "%Y-%m-%d").map_err(|e| {
            SourceError::Unavailable {
                endpoint: "today".to_string(),
                reason: format!("bad date '{}': {e}", response.date),
            }
            .into()
        })
    }

    async fn quotes(&self, date: NaiveDate) -> Result<Vec<Quote>> {
        self.get_records("props", date).await
    }

    async fn arbitrage(&self, date: NaiveDate) -> Result<Vec<ArbitrageOpportunity>> {
        self.get_records("arbitrage", date).await
    }

    async fn value_bets(&self, date: NaiveDate) -> Result<Vec<ValueBet>> {
        self.get_records("value-bets", date).await
    }

    async fn consensus_bets(&self, date: NaiveDate) -> Result<Vec<ConsensusBet>> {
        self.get_records("consensus-bets", date).await
    }

    async fn discrepancies(&self, date: NaiveDate) -> Result<Vec<LineDiscrepancy>> {
        self.get_records("discrepancies", date).await
    }

    async fn best_odds(&self, date: NaiveDate) -> Result<Vec<BestOddsPick>> {
        self.get_records("best-odds", date).await
    }

    async fn trigger_refresh(&self) -> Result<()> {
        let url = self.url("trigger-scrape");
        info!(url = %url, "Triggering upstream re-scrape");

        let response = self
            .client
            .post(&url)
            .timeout(self.scrape_timeout)
            .send()
            .await
            .map_err(|e| SourceError::RefreshFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            if status == StatusCode::ACCEPTED {
                debug!("Re-scrape accepted, running upstream");
            }
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, "Re-scrape trigger rejected");
        trigger_status(status, &body).map_err(Into::into)
    }

    fn source_name(&self) -> &'static str {
        "dashboard-api"
    }
}
