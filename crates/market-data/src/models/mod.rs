//! Market data models
//!
//! This module contains the core data types for the rates panel:
//! - `types` - Type aliases for common identifiers (ProviderId, Currency)
//! - `pair` - Currency pair identity and the fixed panel request set
//! - `rates` - Normalized provider payloads (RateTable, MetalSpot)
//! - `quote` - The display-ready panel quote (Quote)

mod pair;
mod quote;
mod rates;
mod types;

pub use pair::{
    CurrencyPair, GOLD_PRICE_DECIMALS, GOLD_SYMBOL, PAIR_PRICE_DECIMALS, REQUESTED_PAIRS,
};
pub use quote::Quote;
pub use rates::{MetalSpot, RateTable};
pub use types::{Currency, ProviderId};
