//! exchangerate-api.com provider (open v4 endpoint, keyless).
//!
//! Serves a full USD rate table. This is the first provider in the default
//! chain and also the source the gold derivation falls back on.

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
const PROVIDER_ID: &str = "EXCHANGE_RATE_API";

/// Open v4 endpoint, base currency baked into the path.
const ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Response body of the open v4 endpoint.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    /// Base currency of the table
    base: String,
    /// Currency code -> units per one base unit
    rates: HashMap<String, Decimal>,
}

/// Open endpoint of exchangerate-api.com.
pub struct ExchangeRateApiProvider {
    client: Client,
    timeout: Duration,
}

impl ExchangeRateApiProvider {
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

impl Default for ExchangeRateApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateTableProvider for ExchangeRateApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_rates(&self) -> Result<RateTable, MarketDataError> {
        let body: LatestResponse = fetch_json(&self.client, ENDPOINT, PROVIDER_ID).await?;

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
