//! Fetched data validation.
//!
//! A provider answering with HTTP 200 is not enough: the body has to
//! actually cover the currency panel, and a gold level has to be in a
//! believable range before it is allowed to reach the cache.

use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::{MetalSpot, RateTable, REQUESTED_PAIRS};

/// Gold quotes at or below this level are treated as garbage data.
///
/// Free-tier endpoints occasionally return placeholder values (0, 1, or a
/// truncated number) instead of an error status. Spot gold has not traded
/// anywhere near this floor in decades, so anything under it is noise.
pub(crate) const GOLD_PLAUSIBLE_FLOOR: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Check that a rate table can price every pair on the panel.
///
/// A table that parses but is missing one of the required currencies is
/// rejected as a whole so the chain can move on to the next provider.
pub(crate) fn validate_rate_table(table: &RateTable) -> Result<(), MarketDataError> {
    for pair in &REQUESTED_PAIRS {
        if table.cross_rate(&pair.base, &pair.quote).is_none() {
            return Err(MarketDataError::MalformedResponse {
                provider: table.source.to_string(),
                message: format!("no usable rate for {}", pair),
            });
        }
    }
    Ok(())
}

/// Check that a gold spot is plausible before accepting it.
pub(crate) fn validate_gold_spot(
    provider: &str,
    spot: &MetalSpot,
) -> Result<(), MarketDataError> {
    if spot.price <= GOLD_PLAUSIBLE_FLOOR {
        return Err(MarketDataError::ValidationFailed {
            provider: provider.to_string(),
            message: format!(
                "gold price {} at or below plausibility floor {}",
                spot.price, GOLD_PLAUSIBLE_FLOOR
            ),
        });
    }
    Ok(())
}
