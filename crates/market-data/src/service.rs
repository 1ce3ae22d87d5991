//! Quote panel assembly.
//!
//! `MarketDataService` turns raw provider data into the four-symbol
//! display panel: three currency pairs priced off one rate table, plus
//! gold. Results are cached for a short window so UI-driven refresh
//! bursts do not hammer the free endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rust_decimal::Decimal;

use crate::cache::QuoteCache;
use crate::change;
use crate::errors::MarketDataError;
use crate::models::{
    CurrencyPair, MetalSpot, Quote, GOLD_PRICE_DECIMALS, GOLD_SYMBOL, PAIR_PRICE_DECIMALS,
    REQUESTED_PAIRS,
};
use crate::registry::ProviderRegistry;

/// Service surface consumed by presentation layers.
#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// The current quote panel: one quote per requested pair, then gold,
    /// always in the same order. Served from cache when fresh.
    async fn get_quotes(&self) -> Result<Vec<Quote>, MarketDataError>;

    /// Drop the cached panel so the next request goes upstream.
    fn clear_cache(&self);

    /// Exchange rate between two currencies, derived from the same rate
    /// chain the panel uses.
    async fn get_currency_rate(&self, from: &str, to: &str)
        -> Result<Decimal, MarketDataError>;
}

/// Quote panel service over a provider registry and a single-slot cache.
pub struct MarketDataService {
    registry: Arc<ProviderRegistry>,
    cache: QuoteCache,
}

impl MarketDataService {
    /// Create a service with the default cache TTL.
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            cache: QuoteCache::new(),
        }
    }

    /// Create a service with a custom cache TTL.
    pub fn with_cache_ttl(registry: Arc<ProviderRegistry>, ttl: Duration) -> Self {
        Self {
            registry,
            cache: QuoteCache::with_ttl(ttl),
        }
    }

    /// Create a service wired to the default public endpoints.
    pub fn with_default_providers() -> Self {
        Self::new(Arc::new(ProviderRegistry::with_default_providers()))
    }

    /// Fetch upstream data and assemble the full panel.
    ///
    /// Both chains have to succeed: a panel with a hole in it is worse
    /// than an error the caller can retry.
    async fn refresh_quotes(&self) -> Result<Vec<Quote>, MarketDataError> {
        let table = self.registry.fetch_rate_table().await?;
        let spot = self.registry.fetch_gold_spot().await?;

        let now = Utc::now();
        let mut quotes = Vec::with_capacity(REQUESTED_PAIRS.len() + 1);

        for pair in &REQUESTED_PAIRS {
            let price = table.cross_rate(&pair.base, &pair.quote).ok_or_else(|| {
                MarketDataError::MalformedResponse {
                    provider: table.source.to_string(),
                    message: format!("no usable rate for {}", pair),
                }
            })?;
            quotes.push(pair_quote(pair, price, now));
        }
        quotes.push(gold_quote(&spot, now));

        info!(
            "Assembled quote panel: {} quotes, rates from '{}'",
            quotes.len(),
            table.source
        );
        Ok(quotes)
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn get_quotes(&self) -> Result<Vec<Quote>, MarketDataError> {
        if let Some(quotes) = self.cache.get() {
            return Ok(quotes);
        }

        debug!("Cache miss, fetching quote panel from providers");
        let quotes = self.refresh_quotes().await?;
        self.cache.put(quotes.clone());
        Ok(quotes)
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn get_currency_rate(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Decimal, MarketDataError> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        let table = self.registry.fetch_rate_table().await?;
        table
            .cross_rate(from, to)
            .ok_or_else(|| MarketDataError::MalformedResponse {
                provider: table.source.to_string(),
                message: format!("no usable rate for {}/{}", from, to),
            })
    }
}

/// Panel quote for one currency pair.
///
/// The free endpoints report levels only, so the change is always
/// synthetic here.
fn pair_quote(pair: &CurrencyPair, price: Decimal, at: DateTime<Utc>) -> Quote {
    let percent = change::pair_percent();
    let change = price * percent / Decimal::ONE_HUNDRED;

    Quote::from_decimals(
        pair.symbol(),
        price,
        change,
        percent,
        PAIR_PRICE_DECIMALS,
        true,
        at,
    )
}

/// Panel quote for gold.
///
/// Provider-reported change figures are used when present, with the
/// missing one derived from the other. When the provider reports neither,
/// or the reported percentage is too large to derive a dollar change
/// from, the change becomes synthetic.
fn gold_quote(spot: &MetalSpot, at: DateTime<Utc>) -> Quote {
    let reported = match (spot.change, spot.change_percent) {
        (Some(change), Some(percent)) => Some((change, percent)),
        (Some(change), None) => Some((change, percent_of(change, spot.price))),
        (None, Some(percent)) => spot
            .price
            .checked_mul(percent)
            .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
            .map(|change| (change, percent)),
        (None, None) => None,
    };

    let (change, percent, synthetic) = match reported {
        Some((change, percent)) => (change, percent, false),
        None => {
            let change = change::gold_dollars();
            (change, percent_of(change, spot.price), true)
        }
    };

    Quote::from_decimals(
        GOLD_SYMBOL.to_string(),
        spot.price,
        change,
        percent,
        GOLD_PRICE_DECIMALS,
        synthetic,
        at,
    )
}

fn percent_of(change: Decimal, price: Decimal) -> Decimal {
    if price.is_zero() {
        Decimal::ZERO
    } else {
        change / price * Decimal::ONE_HUNDRED
    }
}
