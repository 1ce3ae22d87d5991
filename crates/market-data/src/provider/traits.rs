//! Provider trait definitions for the two fetch chains.
//!
//! The rates panel pulls from two independent chains: one for the USD
//! exchange-rate table the currency pairs are derived from, one for the
//! gold spot price. Implement one of these traits to add an endpoint to
//! the corresponding chain.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{MetalSpot, RateTable};

/// Default per-attempt budget for rate-table providers.
pub const DEFAULT_RATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default per-attempt budget for metal providers.
pub const DEFAULT_METAL_TIMEOUT: Duration = Duration::from_secs(8);

/// A provider that serves a full exchange-rate table for one base currency.
///
/// Implementations normalize their own wire format into a [`RateTable`];
/// the registry only ever sees the normalized shape.
#[async_trait]
pub trait RateTableProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "EXCHANGE_RATE_API". Used in logs
    /// and error context.
    fn id(&self) -> &'static str;

    /// Per-attempt time budget.
    ///
    /// The registry abandons the attempt and moves to the next provider
    /// once this elapses.
    fn timeout(&self) -> Duration {
        DEFAULT_RATE_TIMEOUT
    }

    /// Fetch and normalize the current rate table.
    async fn fetch_rates(&self) -> Result<RateTable, MarketDataError>;
}

/// A provider that serves the gold spot price in USD per troy ounce.
#[async_trait]
pub trait MetalQuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    fn id(&self) -> &'static str;

    /// Per-attempt time budget.
    fn timeout(&self) -> Duration {
        DEFAULT_METAL_TIMEOUT
    }

    /// Fetch and normalize the current spot quote.
    ///
    /// Change figures are optional; most of the free endpoints publish a
    /// bare price. When present they are passed through so the panel can
    /// show a real move instead of a synthetic one.
    async fn fetch_spot(&self) -> Result<MetalSpot, MarketDataError>;
}
