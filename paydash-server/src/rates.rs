//! Exchange-rate fetching
//!
//! Upstream failures degrade to a stale fallback table rather than an
//! error status; this endpoint favors availability over correctness.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use paydash_core::currency::parse_upstream;
use paydash_core::RateTable;
use reqwest::blocking::Client;

/// Trait for fetching the upstream USD rate map
///
/// This allows different implementations:
/// - HTTP source (production)
/// - Mock source (testing)
pub trait RateSource: Send + Sync {
    /// Fetch the upstream rates, returning the quote date (if the upstream
    /// reports one) and the full rate map
    fn fetch(&self) -> Result<(Option<String>, BTreeMap<String, f64>), String>;
}

/// HTTP source against a public USD-base rates API
pub struct HttpRateSource {
    client: Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.to_string(),
        }
    }
}

impl RateSource for HttpRateSource {
    fn fetch(&self) -> Result<(Option<String>, BTreeMap<String, f64>), String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        let text = response
            .text()
            .map_err(|e| format!("invalid response: {}", e))?;
        let upstream = parse_upstream(&text).map_err(|e| e.to_string())?;

        Ok((upstream.date, upstream.rates))
    }
}

/// Current rate table, synthesizing a stale fallback on upstream failure
pub async fn current_rates<R>(source: Arc<R>) -> RateTable
where
    R: RateSource + 'static,
{
    let today = Utc::now().format("%Y-%m-%d").to_string();

    match tokio::task::spawn_blocking(move || source.fetch()).await {
        Ok(Ok((date, rates))) => RateTable::from_upstream(date.unwrap_or(today), &rates),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Rate fetch failed, serving stale fallback");
            RateTable::fallback(today)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rate fetch task failed, serving stale fallback");
            RateTable::fallback(today)
        }
    }
}
