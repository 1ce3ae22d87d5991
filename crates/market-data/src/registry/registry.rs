//! Ordered fallback across market data providers.
//!
//! The registry holds two provider chains, one for currency rate tables
//! and one for the gold spot, and walks each in order:
//! 1. Apply the provider's own attempt timeout
//! 2. Fetch and parse
//! 3. Validate the result (panel coverage, plausibility)
//! 4. On any failure, log and try the next provider
//!
//! The first validated result wins. A chain that runs out of providers is
//! a terminal failure for that fetch.

use std::sync::Arc;

use log::{debug, info, warn};

use super::validator::{validate_gold_spot, validate_rate_table};
use crate::errors::MarketDataError;
use crate::models::{MetalSpot, RateTable};
use crate::provider::{
    ExchangeHostProvider, ExchangeRateApiProvider, FxRatesApiProvider, GoldApiProvider,
    MetalQuoteProvider, MetalsLiveProvider, OpenErApiProvider, RateTableProvider,
    UsdTableGoldProvider,
};

/// Provider chains with ordered fallback.
pub struct ProviderRegistry {
    rate_providers: Vec<Arc<dyn RateTableProvider>>,
    metal_providers: Vec<Arc<dyn MetalQuoteProvider>>,
}

impl ProviderRegistry {
    /// Create a registry from explicit provider chains.
    ///
    /// Order matters: providers are tried front to back.
    pub fn new(
        rate_providers: Vec<Arc<dyn RateTableProvider>>,
        metal_providers: Vec<Arc<dyn MetalQuoteProvider>>,
    ) -> Self {
        Self {
            rate_providers,
            metal_providers,
        }
    }

    /// Create a registry with the default public endpoints.
    ///
    /// The rate chain starts with the most reliable free endpoint and falls
    /// back through three alternatives. The metal chain ends with a derived
    /// gold level so the panel stays complete even when every spot endpoint
    /// is down.
    pub fn with_default_providers() -> Self {
        Self::new(
            vec![
                Arc::new(ExchangeRateApiProvider::new()),
                Arc::new(ExchangeHostProvider::new()),
                Arc::new(FxRatesApiProvider::new()),
                Arc::new(OpenErApiProvider::new()),
            ],
            vec![
                Arc::new(MetalsLiveProvider::new()),
                Arc::new(GoldApiProvider::new()),
                Arc::new(UsdTableGoldProvider::new()),
            ],
        )
    }

    /// Fetch a rate table covering the currency panel.
    ///
    /// Walks the rate chain in order and returns the first table that
    /// parses and prices every required pair.
    pub async fn fetch_rate_table(&self) -> Result<RateTable, MarketDataError> {
        if self.rate_providers.is_empty() {
            warn!("No rate providers registered");
            return Err(MarketDataError::NoProvidersAvailable);
        }

        let mut last_error: Option<MarketDataError> = None;

        for provider in &self.rate_providers {
            debug!("Trying rate provider '{}'", provider.id());

            match tokio::time::timeout(provider.timeout(), provider.fetch_rates()).await {
                Ok(Ok(table)) => match validate_rate_table(&table) {
                    Ok(()) => {
                        info!(
                            "Rate provider '{}' returned a usable table ({} rates, base {})",
                            provider.id(),
                            table.rates.len(),
                            table.base
                        );
                        return Ok(table);
                    }
                    Err(e) => {
                        warn!("Rate provider '{}' rejected: {}", provider.id(), e);
                        last_error = Some(e);
                    }
                },
                Ok(Err(e)) => {
                    warn!("Rate provider '{}' failed: {}", provider.id(), e);
                    last_error = Some(e);
                }
                Err(_) => {
                    warn!(
                        "Rate provider '{}' timed out after {:?}",
                        provider.id(),
                        provider.timeout()
                    );
                    last_error = Some(MarketDataError::Timeout {
                        provider: provider.id().to_string(),
                    });
                }
            }
        }

        if let Some(e) = last_error {
            warn!(
                "All {} rate providers failed, last error: {}",
                self.rate_providers.len(),
                e
            );
        }
        Err(MarketDataError::AllProvidersFailed)
    }

    /// Fetch a plausible gold spot.
    ///
    /// Same chain walk as the rate table, with the plausibility floor in
    /// place of the panel coverage check.
    pub async fn fetch_gold_spot(&self) -> Result<MetalSpot, MarketDataError> {
        if self.metal_providers.is_empty() {
            warn!("No metal providers registered");
            return Err(MarketDataError::NoProvidersAvailable);
        }

        let mut last_error: Option<MarketDataError> = None;

        for provider in &self.metal_providers {
            debug!("Trying metal provider '{}'", provider.id());

            match tokio::time::timeout(provider.timeout(), provider.fetch_spot()).await {
                Ok(Ok(spot)) => match validate_gold_spot(provider.id(), &spot) {
                    Ok(()) => {
                        info!(
                            "Metal provider '{}' returned gold at {}",
                            provider.id(),
                            spot.price
                        );
                        return Ok(spot);
                    }
                    Err(e) => {
                        warn!("Metal provider '{}' rejected: {}", provider.id(), e);
                        last_error = Some(e);
                    }
                },
                Ok(Err(e)) => {
                    warn!("Metal provider '{}' failed: {}", provider.id(), e);
                    last_error = Some(e);
                }
                Err(_) => {
                    warn!(
                        "Metal provider '{}' timed out after {:?}",
                        provider.id(),
                        provider.timeout()
                    );
                    last_error = Some(MarketDataError::Timeout {
                        provider: provider.id().to_string(),
                    });
                }
            }
        }

        if let Some(e) = last_error {
            warn!(
                "All {} metal providers failed, last error: {}",
                self.metal_providers.len(),
                e
            );
        }
        Err(MarketDataError::AllProvidersFailed)
    }
}
