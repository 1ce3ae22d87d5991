//! goldapi.io XAU/USD provider.
//!
//! The only provider in the metal chain that publishes real change data:
//! `ch` (absolute) and `chp` (percent) against the previous close. When
//! present they flow through, so the gold quote carries a real move
//! instead of a synthetic one.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::MetalSpot;
use crate::provider::{build_client, fetch_json, MetalQuoteProvider, DEFAULT_METAL_TIMEOUT};

/// Provider ID constant
const PROVIDER_ID: &str = "GOLD_API";

const ENDPOINT: &str = "https://api.goldapi.io/api/XAU/USD";

/// Response body of the XAU/USD endpoint.
#[derive(Debug, Deserialize)]
struct GoldApiResponse {
    /// Spot price in USD per troy ounce
    price: Option<Decimal>,
    /// Some deployments publish the price under `value`
    value: Option<Decimal>,
    /// Absolute change since the previous close
    ch: Option<Decimal>,
    /// Percentage change since the previous close
    chp: Option<Decimal>,
}

/// XAU/USD spot endpoint of goldapi.io.
pub struct GoldApiProvider {
    client: Client,
    timeout: Duration,
}

impl GoldApiProvider {
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

impl Default for GoldApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetalQuoteProvider for GoldApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_spot(&self) -> Result<MetalSpot, MarketDataError> {
        let body: GoldApiResponse = fetch_json(&self.client, ENDPOINT, PROVIDER_ID).await?;

        let price = body
            .price
            .or(body.value)
            .ok_or_else(|| MarketDataError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: "no price or value field".to_string(),
            })?;

        debug!(
            "{}: spot gold at {} (ch {:?}, chp {:?})",
            PROVIDER_ID, price, body.ch, body.chp
        );

        Ok(MetalSpot {
            price,
            change: body.ch,
            change_percent: body.chp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = GoldApiProvider::new();
        assert_eq!(provider.id(), "GOLD_API");
    }

    #[test]
    fn test_response_with_change_fields() {
        let body = r#"{
            "timestamp": 1755734401,
            "metal": "XAU",
            "currency": "USD",
            "price": 4084.6,
            "ch": 19.89,
            "chp": 0.48
        }"#;
        let parsed: GoldApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.price, Some(dec!(4084.6)));
        assert_eq!(parsed.ch, Some(dec!(19.89)));
        assert_eq!(parsed.chp, Some(dec!(0.48)));
    }

    #[test]
    fn test_response_with_value_only() {
        let body = r#"{ "value": 4084.6 }"#;
        let parsed: GoldApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.price, None);
        assert_eq!(parsed.value, Some(dec!(4084.6)));
        assert_eq!(parsed.ch, None);
    }
}
