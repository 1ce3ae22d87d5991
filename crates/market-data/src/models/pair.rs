use std::borrow::Cow;
use std::fmt;

use super::types::Currency;

/// A currency pair in `BASE/QUOTE` notation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurrencyPair {
    /// Base currency, the unit being priced.
    pub base: Currency,
    /// Quote currency, the unit the price is expressed in.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a pair from two static currency codes.
    pub const fn borrowed(base: &'static str, quote: &'static str) -> Self {
        Self {
            base: Cow::Borrowed(base),
            quote: Cow::Borrowed(quote),
        }
    }

    /// Display symbol, e.g. "EUR/USD".
    pub fn symbol(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// The currency pairs shown on the rates panel, in display order.
pub const REQUESTED_PAIRS: [CurrencyPair; 3] = [
    CurrencyPair::borrowed("EUR", "USD"),
    CurrencyPair::borrowed("GBP", "USD"),
    CurrencyPair::borrowed("USD", "JPY"),
];

/// Display symbol for the gold quote (troy ounce priced in USD).
pub const GOLD_SYMBOL: &str = "XAU/USD";

/// Price decimals used for currency pairs.
pub const PAIR_PRICE_DECIMALS: u32 = 4;

/// Price decimals used for the gold quote.
pub const GOLD_PRICE_DECIMALS: u32 = 2;
