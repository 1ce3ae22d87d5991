//! metals.live spot gold provider.
//!
//! The endpoint has served several body shapes over time: the price has
//! appeared under `price`, `value` or `spot_price`, either at the top
//! level or inside a `data` wrapper. The parser probes for all of them
//! instead of pinning one shape.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::MetalSpot;
use crate::provider::{build_client, fetch_json, MetalQuoteProvider, DEFAULT_METAL_TIMEOUT};

/// Provider ID constant
const PROVIDER_ID: &str = "METALS_LIVE";

const ENDPOINT: &str = "https://api.metals.live/v1/spot/gold";

/// Keys the spot price has been published under.
const PRICE_KEYS: [&str; 3] = ["price", "value", "spot_price"];

/// Spot gold endpoint of metals.live.
pub struct MetalsLiveProvider {
    client: Client,
    timeout: Duration,
}

impl MetalsLiveProvider {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_METAL_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            timeout,
        }
    }
}

impl Default for MetalsLiveProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetalQuoteProvider for MetalsLiveProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_spot(&self) -> Result<MetalSpot, MarketDataError> {
        let body: Value = fetch_json(&self.client, ENDPOINT, PROVIDER_ID).await?;

        let price = extract_price(&body).ok_or_else(|| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: "no price field in any known location".to_string(),
        })?;

        debug!("{}: spot gold at {}", PROVIDER_ID, price);

        Ok(MetalSpot::price_only(price))
    }
}

/// Probe the body for a spot price, at the top level first and then under
/// a `data` wrapper.
fn extract_price(body: &Value) -> Option<Decimal> {
    probe_keys(body).or_else(|| body.get("data").and_then(probe_keys))
}

fn probe_keys(value: &Value) -> Option<Decimal> {
    PRICE_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(decimal_from_value))
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
