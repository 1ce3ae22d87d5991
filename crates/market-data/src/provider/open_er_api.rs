//! open.er-api.com provider (v6 open endpoint).
//!
//! Last provider in the default rate chain. The body names its base
//! currency `base_code` and signals failure through a `result` string
//! rather than an HTTP status.

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
const PROVIDER_ID: &str = "OPEN_ER_API";

const ENDPOINT: &str = "https://open.er-api.com/v6/latest/USD";

/// Response body of the open v6 endpoint.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    /// "success" or "error"
    result: String,
    /// Base currency of the table
    base_code: String,
    /// Currency code -> units per one base unit
    rates: HashMap<String, Decimal>,
}

/// Open v6 endpoint of open.er-api.com.
pub struct OpenErApiProvider {
    client: Client,
    timeout: Duration,
}

impl OpenErApiProvider {
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

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateTableProvider for OpenErApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_rates(&self) -> Result<RateTable, MarketDataError> {
        let body: LatestResponse = fetch_json(&self.client, ENDPOINT, PROVIDER_ID).await?;

        if body.result != "success" {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("result is '{}'", body.result),
            });
        }

        debug!(
            "{}: received {} rates (base {})",
            PROVIDER_ID,
            body.rates.len(),
            body.base_code
        );

        Ok(RateTable::new(
            body.base_code,
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
        let provider = OpenErApiProvider::new();
        assert_eq!(provider.id(), "OPEN_ER_API");
    }

    #[test]
    fn test_response_shape() {
        let body = r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1755734401,
            "rates": { "USD": 1, "EUR": 0.92 }
        }"#;
        let parsed: LatestResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.result, "success");
        assert_eq!(parsed.base_code, "USD");
    }

    #[test]
    fn test_error_result_shape() {
        let body = r#"{ "result": "error", "base_code": "USD", "rates": {} }"#;
        let parsed: LatestResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.result, "error");
    }
}
