use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A display-ready quote for one symbol on the rates panel.
///
/// Prices and changes are carried as fixed-decimal strings so every consumer
/// renders the same digits: 4 decimals for currency pairs, 2 for gold. The
/// change fields carry an explicit sign prefix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Display symbol, e.g. "EUR/USD".
    pub symbol: String,

    /// Current price, fixed decimals.
    pub price: String,

    /// Absolute change, sign-prefixed, same decimals as `price`.
    pub change: String,

    /// Percentage change, sign-prefixed, 2 decimals, trailing `%`.
    pub change_percent: String,

    /// Whether the displayed change is non-negative.
    pub is_positive: bool,

    /// When the quote was assembled, serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// True when the change figures are locally generated rather than
    /// reported by a provider.
    pub is_synthetic_change: bool,
}

impl Quote {
    /// Build a quote from decimal values, formatting them exactly once.
    ///
    /// `price_decimals` controls the price and change precision; the percent
    /// is always rendered with 2 decimals. `is_positive` is derived from the
    /// rounded change so the flag can never disagree with the rendered sign.
    pub fn from_decimals(
        symbol: String,
        price: Decimal,
        change: Decimal,
        change_percent: Decimal,
        price_decimals: u32,
        is_synthetic_change: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let change = display_round(change, price_decimals);
        let change_percent = display_round(change_percent, 2);

        Self {
            symbol,
            price: format_fixed(display_round(price, price_decimals), price_decimals),
            change: format_signed(change, price_decimals),
            change_percent: format!("{}%", format_signed(change_percent, 2)),
            is_positive: change >= Decimal::ZERO,
            timestamp,
            is_synthetic_change,
        }
    }
}

/// Round to `dp` decimals, normalizing negative zero to plain zero.
fn display_round(value: Decimal, dp: u32) -> Decimal {
    let rounded = value.round_dp(dp);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Fixed-decimal rendering without a sign prefix.
fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.prec$}", value, prec = dp as usize)
}

/// Fixed-decimal rendering with an explicit `+` for non-negative values.
/// Negative values already carry their sign from the decimal itself.
fn format_signed(value: Decimal, dp: u32) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.prec$}", value, prec = dp as usize)
    } else {
        format!("{:.prec$}", value, prec = dp as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_quote(price: Decimal, change: Decimal, percent: Decimal, dp: u32) -> Quote {
        Quote::from_decimals(
            "EUR/USD".to_string(),
            price,
            change,
            percent,
            dp,
            true,
            Utc::now(),
        )
    }

    #[test]
    fn test_pair_formatting() {
        let quote = make_quote(dec!(1.08695652), dec!(0.0023), dec!(0.21), 4);
        assert_eq!(quote.price, "1.0870");
        assert_eq!(quote.change, "+0.0023");
        assert_eq!(quote.change_percent, "+0.21%");
        assert!(quote.is_positive);
    }

    #[test]
    fn test_negative_change_formatting() {
        let quote = make_quote(dec!(1.2678), dec!(-0.0012), dec!(-0.09), 4);
        assert_eq!(quote.change, "-0.0012");
        assert_eq!(quote.change_percent, "-0.09%");
        assert!(!quote.is_positive);
    }

    #[test]
    fn test_short_price_is_zero_padded() {
        let quote = make_quote(dec!(149.5), dec!(0.45), dec!(0.3), 4);
        assert_eq!(quote.price, "149.5000");
        assert_eq!(quote.change, "+0.4500");
        assert_eq!(quote.change_percent, "+0.30%");
    }

    #[test]
    fn test_gold_uses_two_decimals() {
        let quote = make_quote(dec!(4084.602), dec!(19.891), dec!(0.487), 2);
        assert_eq!(quote.price, "4084.60");
        assert_eq!(quote.change, "+19.89");
        assert_eq!(quote.change_percent, "+0.49%");
    }

    #[test]
    fn test_change_rounding_to_zero_renders_positive() {
        // A tiny negative change rounds to zero at display precision; the
        // rendered sign and the flag must agree.
        let quote = make_quote(dec!(1.0870), dec!(-0.000004), dec!(-0.0004), 4);
        assert_eq!(quote.change, "+0.0000");
        assert_eq!(quote.change_percent, "+0.00%");
        assert!(quote.is_positive);
    }

    #[test]
    fn test_serde_wire_shape() {
        // Fixed millisecond timestamp so the roundtrip compares exactly.
        let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let quote = Quote::from_decimals(
            "XAU/USD".to_string(),
            dec!(4084.60),
            dec!(19.89),
            dec!(0.48),
            2,
            false,
            at,
        );

        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["symbol"], "XAU/USD");
        assert_eq!(value["price"], "4084.60");
        assert_eq!(value["changePercent"], "+0.48%");
        assert_eq!(value["isPositive"], true);
        assert_eq!(value["isSyntheticChange"], false);
        assert!(value["timestamp"].is_i64());

        let back: Quote = serde_json::from_value(value).unwrap();
        assert_eq!(back, quote);
    }
}
