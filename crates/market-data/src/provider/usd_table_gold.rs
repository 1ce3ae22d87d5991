//! Gold derivation from a USD rate table.
//!
//! Last resort of the metal chain: when no spot endpoint answers, gold is
//! derived from a rate-table provider and a fixed reference price. The
//! result tracks the USD leg only, so it is a placeholder level rather
//! than a live spot, but it keeps the panel complete.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::MetalSpot;
use crate::provider::exchange_rate_api::ExchangeRateApiProvider;
use crate::provider::{MetalQuoteProvider, RateTableProvider, DEFAULT_METAL_TIMEOUT};

/// Provider ID constant
const PROVIDER_ID: &str = "USD_TABLE_GOLD";

/// Reference gold price in USD per troy ounce the derivation starts from.
const REFERENCE_PRICE: Decimal = Decimal::from_parts(410800, 0, 0, false, 2);

/// Derives a gold level from a rate-table provider.
pub struct UsdTableGoldProvider {
    source: Arc<dyn RateTableProvider>,
    timeout: Duration,
}

impl UsdTableGoldProvider {
    /// Derivation backed by the default rate-table endpoint.
    pub fn new() -> Self {
        Self::with_source(Arc::new(ExchangeRateApiProvider::new()))
    }

    /// Derivation backed by an explicit rate-table provider.
    pub fn with_source(source: Arc<dyn RateTableProvider>) -> Self {
        Self {
            source,
            timeout: DEFAULT_METAL_TIMEOUT,
        }
    }
}

impl Default for UsdTableGoldProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetalQuoteProvider for UsdTableGoldProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_spot(&self) -> Result<MetalSpot, MarketDataError> {
        let table = self.source.fetch_rates().await?;

        let usd_rate = table
            .rate("USD")
            .ok_or_else(|| MarketDataError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("table from {} has no usable USD rate", table.source),
            })?;

        let price = REFERENCE_PRICE
            .checked_div(usd_rate)
            .ok_or_else(|| MarketDataError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!(
                    "USD rate {} from {} cannot price gold",
                    usd_rate, table.source
                ),
            })?;
        debug!(
            "{}: derived gold at {} from {} (USD rate {})",
            PROVIDER_ID, price, table.source, usd_rate
        );

        Ok(MetalSpot::price_only(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateTable;
    use rust_decimal_macros::dec;
    use std::borrow::Cow;
    use std::collections::HashMap;

    struct FixedTableProvider {
        base: &'static str,
        rates: HashMap<String, Decimal>,
    }

    #[async_trait]
    impl RateTableProvider for FixedTableProvider {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        async fn fetch_rates(&self) -> Result<RateTable, MarketDataError> {
            Ok(RateTable::new(
                self.base.to_string(),
                self.rates.clone(),
                Cow::Borrowed("FIXED"),
            ))
        }
    }

    #[tokio::test]
    async fn test_derivation_from_usd_base_table() {
        let provider = UsdTableGoldProvider::with_source(Arc::new(FixedTableProvider {
            base: "USD",
            rates: HashMap::new(),
        }));

        // The base entry is normalized to 1, so the derivation returns the
        // reference price unchanged.
        let spot = provider.fetch_spot().await.unwrap();
        assert_eq!(spot.price, dec!(4108.00));
        assert!(spot.change.is_none());
        assert!(spot.change_percent.is_none());
    }

    #[tokio::test]
    async fn test_derivation_scales_with_usd_rate() {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), dec!(1.0270));

        let provider = UsdTableGoldProvider::with_source(Arc::new(FixedTableProvider {
            base: "EUR",
            rates,
        }));

        let spot = provider.fetch_spot().await.unwrap();
        assert_eq!(spot.price.round_dp(2), dec!(4000.00));
    }

    #[tokio::test]
    async fn test_vanishing_usd_rate_is_rejected() {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), Decimal::new(1, 28));

        let provider = UsdTableGoldProvider::with_source(Arc::new(FixedTableProvider {
            base: "EUR",
            rates,
        }));

        // Dividing the reference price by a near-zero rate would overflow,
        // so the derivation reports the table as malformed instead.
        let result = provider.fetch_spot().await;
        assert!(matches!(
            result,
            Err(MarketDataError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        struct FailingProvider;

        #[async_trait]
        impl RateTableProvider for FailingProvider {
            fn id(&self) -> &'static str {
                "FAILING"
            }

            async fn fetch_rates(&self) -> Result<RateTable, MarketDataError> {
                Err(MarketDataError::ProviderError {
                    provider: "FAILING".to_string(),
                    message: "boom".to_string(),
                })
            }
        }

        let provider = UsdTableGoldProvider::with_source(Arc::new(FailingProvider));
        assert!(provider.fetch_spot().await.is_err());
    }
}
