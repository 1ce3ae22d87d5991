//! Synthetic change generation.
//!
//! The free rate endpoints report current levels only, with no daily
//! move. To keep the change column alive the service generates a small
//! random move instead and flags the quote as synthetic so consumers can
//! render it differently.

use rand::Rng;
use rust_decimal::Decimal;

/// Half-width of the synthetic percent move for currency pairs.
const PAIR_PERCENT_SPAN: f64 = 0.25;

/// Half-width of the synthetic dollar move for gold.
const GOLD_DOLLAR_SPAN: f64 = 10.0;

/// A synthetic percent move for a currency pair, within ±0.25.
pub(crate) fn pair_percent() -> Decimal {
    random_span(PAIR_PERCENT_SPAN)
}

/// A synthetic dollar move for gold, within ±10.
pub(crate) fn gold_dollars() -> Decimal {
    random_span(GOLD_DOLLAR_SPAN)
}

fn random_span(span: f64) -> Decimal {
    let value = rand::thread_rng().gen_range(-span..span);
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pair_percent_stays_in_span() {
        for _ in 0..200 {
            let value = pair_percent();
            assert!(value.abs() <= dec!(0.25), "out of span: {value}");
        }
    }

    #[test]
    fn test_gold_dollars_stays_in_span() {
        for _ in 0..200 {
            let value = gold_dollars();
            assert!(value.abs() <= dec!(10), "out of span: {value}");
        }
    }

    #[test]
    fn test_moves_actually_vary() {
        let first = pair_percent();
        let varied = (0..50).map(|_| pair_percent()).any(|v| v != first);
        assert!(varied, "repeated draws produced a single value");
    }
}
