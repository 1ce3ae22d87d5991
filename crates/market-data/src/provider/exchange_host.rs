//! exchangerate.host provider.
//!
//! Same table contents as the other rate providers behind a different wire
//! shape: the body carries a `success` flag next to the rates.

use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::RateTable;
use crate::provider::{build_client, fetch_json, RateTableProvider, DEFAULT_RATE_TIMEOUT};

/// Provider ID constant
const PROVIDER_ID: &str = "EXCHANGE_HOST";

const ENDPOINT: &str = "https://api.exchangerate.host/latest?base=USD";

/// Response body of the latest-rates endpoint.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    /// False when the service rejected the request
    success: Option<bool>,
    /// Base currency of the table
    base: String,
    /// Currency code -> units per one base unit
    rates: HashMap<String, Decimal>,
}

/// Keyless latest-rates endpoint of exchangerate.host.
pub struct ExchangeHostProvider {
    client: Client,
    timeout: Duration,
}

impl ExchangeHostProvider {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_RATE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            timeout,
        }
    }
}

impl Default for ExchangeHostProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateTableProvider for ExchangeHostProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_rates(&self) -> Result<RateTable, MarketDataError> {
        let body: LatestResponse = fetch_json(&self.client, ENDPOINT, PROVIDER_ID).await?;

        if body.success == Some(false) {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "success flag is false".to_string(),
            });
        }

        debug!(
            "{}: received {} rates (base {})",
            PROVIDER_ID,
            body.rates.len(),
            body.base
        );

        Ok(RateTable::new(
            body.base,
            body.rates,
            Cow::Borrowed(PROVIDER_ID),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = ExchangeHostProvider::new();
        assert_eq!(provider.id(), "EXCHANGE_HOST");
    }

    #[test]
    fn test_response_shape() {
        let body = r#"{
            "motd": { "msg": "...", "url": "..." },
            "success": true,
            "base": "USD",
            "date": "2026-08-21",
            "rates": { "EUR": 0.92, "GBP": 0.79 }
        }"#;
        let parsed: LatestResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.success, Some(true));
        assert_eq!(parsed.base, "USD");
        assert_eq!(parsed.rates.len(), 2);
    }

    #[test]
    fn test_success_flag_is_optional() {
        let body = r#"{ "base": "USD", "rates": { "EUR": 0.92 } }"#;
        let parsed: LatestResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.success, None);
    }
}
