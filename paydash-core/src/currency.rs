//! Exchange-rate table shaping
//!
//! The dashboard exposes a fixed set of settlement currencies. Upstream
//! responses are mapped onto that allow-list; when the upstream is
//! unreachable the endpoint serves a zeroed, explicitly stale table
//! instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Currencies exposed by the exchange-rate endpoint
pub const SUPPORTED_CURRENCIES: [&str; 10] = [
    "USD", "EUR", "GBP", "NGN", "GHS", "KES", "ZAR", "CAD", "AUD", "INR",
];

/// Upstream rates payload (USD base)
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRates {
    #[serde(default)]
    pub date: Option<String>,
    pub rates: BTreeMap<String, f64>,
}

/// Parse an upstream rates body
pub fn parse_upstream(body: &str) -> Result<UpstreamRates> {
    Ok(serde_json::from_str(body)?)
}

/// Rate table served by the exchange-rate endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub date: String,
    pub rates: BTreeMap<String, f64>,
    /// Set when the table is a synthesized fallback rather than live data
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stale: bool,
}

impl RateTable {
    /// Map upstream rates onto the supported-currency list
    ///
    /// Currencies missing upstream are carried as `0.0` so the table shape
    /// stays constant for clients.
    pub fn from_upstream(date: String, upstream: &BTreeMap<String, f64>) -> Self {
        let rates = SUPPORTED_CURRENCIES
            .iter()
            .map(|code| ((*code).to_string(), upstream.get(*code).copied().unwrap_or(0.0)))
            .collect();

        Self {
            base: "USD".to_string(),
            date,
            rates,
            stale: false,
        }
    }

    /// Synthesized table served when the upstream fetch fails
    pub fn fallback(date: String) -> Self {
        let rates = SUPPORTED_CURRENCIES
            .iter()
            .map(|code| {
                let rate = if *code == "USD" { 1.0 } else { 0.0 };
                ((*code).to_string(), rate)
            })
            .collect();

        Self {
            base: "USD".to_string(),
            date,
            rates,
            stale: true,
        }
    }
}
