use std::collections::HashMap;

use rust_decimal::Decimal;

use super::types::ProviderId;

/// A normalized exchange-rate table from one provider.
///
/// Rates are expressed as units of currency per one unit of `base`. The
/// base currency itself is always present with a rate of 1.
#[derive(Clone, Debug)]
pub struct RateTable {
    /// Base currency of the table ("USD" for the panel providers).
    pub base: String,
    /// Currency code -> units per one base unit.
    pub rates: HashMap<String, Decimal>,
    /// Provider the table came from.
    pub source: ProviderId,
}

impl RateTable {
    /// Build a table, inserting the base currency at rate 1 when the
    /// provider omits it.
    pub fn new(base: String, mut rates: HashMap<String, Decimal>, source: ProviderId) -> Self {
        rates.entry(base.clone()).or_insert(Decimal::ONE);
        Self {
            base,
            rates,
            source,
        }
    }

    /// Rate for a single currency, if present and positive.
    ///
    /// Zero and negative entries are treated as absent; a table that holds
    /// them cannot price anything against that currency.
    pub fn rate(&self, currency: &str) -> Option<Decimal> {
        self.rates
            .get(currency)
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }

    /// Cross rate for `base/quote` derived through this table's own base:
    /// units of `quote` per one unit of `base`.
    ///
    /// None when either leg is unusable or the ratio does not fit in a
    /// `Decimal`.
    pub fn cross_rate(&self, base: &str, quote: &str) -> Option<Decimal> {
        let base_rate = self.rate(base)?;
        let quote_rate = self.rate(quote)?;
        quote_rate.checked_div(base_rate)
    }
}

/// A normalized spot quote from one metal provider.
#[derive(Clone, Debug)]
pub struct MetalSpot {
    /// Spot price in USD per troy ounce.
    pub price: Decimal,
    /// Absolute change reported by the provider, if it publishes one.
    pub change: Option<Decimal>,
    /// Percentage change reported by the provider, if it publishes one.
    pub change_percent: Option<Decimal>,
}

impl MetalSpot {
    /// A spot quote with no provider-reported change data.
    pub fn price_only(price: Decimal) -> Self {
        Self {
            price,
            change: None,
            change_percent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::borrow::Cow;

    fn usd_table() -> RateTable {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), dec!(0.92));
        rates.insert("GBP".to_string(), dec!(0.79));
        rates.insert("JPY".to_string(), dec!(149.50));
        RateTable::new("USD".to_string(), rates, Cow::Borrowed("TEST"))
    }

    #[test]
    fn test_base_rate_is_inserted() {
        let table = usd_table();
        assert_eq!(table.rate("USD"), Some(dec!(1)));
    }

    #[test]
    fn test_cross_rate_through_base() {
        let table = usd_table();
        // EUR/USD: one euro costs 1 / 0.92 dollars.
        let price = table.cross_rate("EUR", "USD").unwrap();
        assert_eq!(price.round_dp(4), dec!(1.0870));
        // USD/JPY reads straight from the table.
        assert_eq!(table.cross_rate("USD", "JPY"), Some(dec!(149.50)));
    }

    #[test]
    fn test_missing_currency_yields_none() {
        let table = usd_table();
        assert_eq!(table.cross_rate("CHF", "USD"), None);
        assert_eq!(table.cross_rate("USD", "CHF"), None);
    }

    #[test]
    fn test_zero_rate_is_unusable() {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), dec!(0));
        let table = RateTable::new("USD".to_string(), rates, Cow::Borrowed("TEST"));
        assert_eq!(table.rate("EUR"), None);
        assert_eq!(table.cross_rate("EUR", "USD"), None);
    }

    #[test]
    fn test_overflowing_ratio_is_unusable() {
        // A positive but vanishingly small rate passes the zero filter,
        // yet dividing by it would exceed Decimal's range.
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), Decimal::new(1, 28));
        rates.insert("JPY".to_string(), dec!(149.50));
        let table = RateTable::new("USD".to_string(), rates, Cow::Borrowed("TEST"));
        assert_eq!(table.cross_rate("USD", "JPY"), None);
    }

    #[test]
    fn test_provider_base_entry_is_kept() {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), dec!(1.0));
        rates.insert("EUR".to_string(), dec!(0.92));
        let table = RateTable::new("USD".to_string(), rates, Cow::Borrowed("TEST"));
        assert_eq!(table.rate("USD"), Some(dec!(1.0)));
    }
}
