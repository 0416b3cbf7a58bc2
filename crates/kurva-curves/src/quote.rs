//! Market quotes.
//!
//! Rates are quoted in percent as `Decimal` so that input files round-trip
//! exactly; the solvers work with the decimal rate as `f64`.

use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::{CurveError, CurveResult};

/// A market rate quote in percent, either one-way or two-way.
///
/// ```rust
/// use kurva_curves::quote::Quote;
/// use rust_decimal::Decimal;
///
/// let quote = Quote::bid_ask(Decimal::new(35127, 4), Decimal::new(35327, 4)).unwrap();
/// assert_eq!(quote.mid_percent(), Decimal::new(35227, 4));
/// assert!((quote.rate() - 0.035227).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    bid: Decimal,
    ask: Decimal,
    rate: f64,
}

impl Quote {
    /// One-way quote of `percent`.
    pub fn percent(percent: Decimal) -> CurveResult<Self> {
        Self::bid_ask(percent, percent)
    }

    /// Two-way quote; the mid `(bid + ask) / 2` is the calibration target.
    pub fn bid_ask(bid: Decimal, ask: Decimal) -> CurveResult<Self> {
        if bid > ask {
            return Err(CurveError::invalid_instrument(format!(
                "bid {bid}% is above ask {ask}%"
            )));
        }
        let mid = (bid + ask) / Decimal::TWO;
        let rate = (mid / Decimal::ONE_HUNDRED)
            .to_f64()
            .filter(|r| r.is_finite())
            .ok_or_else(|| CurveError::invalid_instrument(format!("quote {mid}% is not representable")))?;

        Ok(Self { bid, ask, rate })
    }

    /// One-way quote from a decimal rate (0.03218 for 3.218%).
    pub fn from_rate(rate: f64) -> CurveResult<Self> {
        let percent = Decimal::from_f64(rate * 100.0)
            .ok_or_else(|| CurveError::invalid_instrument(format!("rate {rate} is not finite")))?;
        Self::percent(percent)
    }

    /// Bid in percent.
    #[must_use]
    pub fn bid(&self) -> Decimal {
        self.bid
    }

    /// Ask in percent.
    #[must_use]
    pub fn ask(&self) -> Decimal {
        self.ask
    }

    /// Mid in percent.
    #[must_use]
    pub fn mid_percent(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// True when bid and ask differ.
    #[must_use]
    pub fn is_two_way(&self) -> bool {
        self.bid != self.ask
    }

    /// Mid as a decimal rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_two_way() {
            write!(f, "{}/{}%", self.bid, self.ask)
        } else {
            write!(f, "{}%", self.bid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_one_way_quote() {
        let quote = Quote::percent(dec!(3.218)).unwrap();
        assert!(!quote.is_two_way());
        assert_eq!(quote.mid_percent(), dec!(3.218));
        assert_relative_eq!(quote.rate(), 0.03218, epsilon = 1e-16);
        assert_eq!(quote.to_string(), "3.218%");
    }

    #[test]
    fn test_two_way_quote_uses_mid() {
        let quote = Quote::bid_ask(dec!(2.5531), dec!(2.5731)).unwrap();
        assert!(quote.is_two_way());
        assert_eq!(quote.mid_percent(), dec!(2.5631));
        assert_relative_eq!(quote.rate(), 0.025631, epsilon = 1e-16);
        assert_eq!(quote.to_string(), "2.5531/2.5731%");
    }

    #[test]
    fn test_crossed_quote_rejected() {
        let err = Quote::bid_ask(dec!(3.6), dec!(3.5)).unwrap_err();
        assert!(matches!(err, CurveError::InvalidInstrument { .. }));
    }

    #[test]
    fn test_from_rate() {
        let quote = Quote::from_rate(0.0425).unwrap();
        assert_relative_eq!(quote.rate(), 0.0425, epsilon = 1e-15);
        assert!(Quote::from_rate(f64::NAN).is_err());
    }
}
