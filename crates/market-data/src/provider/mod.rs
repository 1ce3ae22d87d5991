//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `RateTableProvider` and `MetalQuoteProvider` traits
//! - Concrete providers for the public exchange-rate and gold endpoints
//! - The shared HTTP client and transport error mapping
//!
//! Each provider owns its endpoint URL, response shape, and normalization.
//! The registry treats providers uniformly through the traits: it never
//! sees a wire format, only `RateTable` and `MetalSpot`.

mod traits;

// Rate table providers
pub mod exchange_host;
pub mod exchange_rate_api;
pub mod fx_rates_api;
pub mod open_er_api;

// Metal providers
pub mod gold_api;
pub mod metals_live;
pub mod usd_table_gold;

// Re-exports
pub use traits::{
    MetalQuoteProvider, RateTableProvider, DEFAULT_METAL_TIMEOUT, DEFAULT_RATE_TIMEOUT,
};

pub use exchange_host::ExchangeHostProvider;
pub use exchange_rate_api::ExchangeRateApiProvider;
pub use fx_rates_api::FxRatesApiProvider;
pub use gold_api::GoldApiProvider;
pub use metals_live::MetalsLiveProvider;
pub use open_er_api::OpenErApiProvider;
pub use usd_table_gold::UsdTableGoldProvider;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL};
use reqwest::Client;

use crate::errors::MarketDataError;

/// Browser user agent sent with every request. Several of the free
/// endpoints reject requests without one.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";

/// Build the HTTP client for a provider.
///
/// The client-level timeout matches the provider's per-attempt budget, so
/// a stalled connection cannot outlive the registry's own deadline.
pub(crate) fn build_client(timeout: Duration) -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Client::builder()
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Map a transport error into the error taxonomy.
pub(crate) fn map_request_error(provider: &'static str, e: reqwest::Error) -> MarketDataError {
    if e.is_timeout() {
        MarketDataError::Timeout {
            provider: provider.to_string(),
        }
    } else {
        MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: e.to_string(),
        }
    }
}

/// Fetch `url` and decode the JSON body.
///
/// Non-success statuses become `ProviderError`; undecodable bodies become
/// `MalformedResponse`.
pub(crate) async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    provider: &'static str,
) -> Result<T, MarketDataError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| map_request_error(provider, e))?;

    if !response.status().is_success() {
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("HTTP {}", response.status()),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| MarketDataError::MalformedResponse {
            provider: provider.to_string(),
            message: e.to_string(),
        })
}
