//! FxBoard Market Data Crate
//!
//! This crate fetches the live rates panel shown on the site: three major
//! currency pairs and spot gold, sourced from free public endpoints.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Multiple rate-table providers with ordered fallback
//! - Multiple gold providers, ending in a derived level
//! - Cross-rate derivation from USD-based tables
//! - A short-TTL cache so refresh bursts reuse one round trip
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |    Providers     |  (exchangerate-api, metals.live, etc.)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | ProviderRegistry |  (ordered fallback + validation)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | MarketDataService|  (panel assembly + cache)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |      Quote       |  (display-ready panel entry)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Display-ready quote with formatted price and change
//! - [`RateTable`] - Normalized exchange-rate table from one provider
//! - [`MetalSpot`] - Normalized gold spot from one provider
//! - [`CurrencyPair`] - Pair in `BASE/QUOTE` notation
//! - [`MarketDataService`] - Panel assembly over the provider registry

pub mod cache;
mod change;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod service;

// Re-export all public types from models
pub use models::{
    Currency, CurrencyPair, MetalSpot, ProviderId, Quote, RateTable, GOLD_PRICE_DECIMALS,
    GOLD_SYMBOL, PAIR_PRICE_DECIMALS, REQUESTED_PAIRS,
};

// Re-export error types
pub use errors::MarketDataError;

// Re-export provider types
pub use provider::exchange_host::ExchangeHostProvider;
pub use provider::exchange_rate_api::ExchangeRateApiProvider;
pub use provider::fx_rates_api::FxRatesApiProvider;
pub use provider::gold_api::GoldApiProvider;
pub use provider::metals_live::MetalsLiveProvider;
pub use provider::open_er_api::OpenErApiProvider;
pub use provider::usd_table_gold::UsdTableGoldProvider;
pub use provider::{
    MetalQuoteProvider, RateTableProvider, DEFAULT_METAL_TIMEOUT, DEFAULT_RATE_TIMEOUT,
};

// Re-export registry and service types
pub use cache::{QuoteCache, DEFAULT_CACHE_TTL};
pub use registry::ProviderRegistry;
pub use service::{MarketDataService, MarketDataServiceTrait};
