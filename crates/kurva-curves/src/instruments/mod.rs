//! Curve instruments.
//!
//! - [`Deposit`]: money market deposit quoted as a simple rate
//! - [`Swap`]: fixed-vs-floating swap quoted at its par rate
//!
//! Both implement [`RateInstrument`]; [`Instrument`] is the closed set the
//! solvers work on.

mod deposit;
mod swap;

pub use deposit::{Deposit, DepositConventions};
pub use swap::{Swap, SwapConventions};

use kurva_core::Date;

use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::quote::Quote;

/// An instrument whose quote is a rate implied by a discount curve.
pub trait RateInstrument {
    /// Rate implied by `curve`, comparable to the quote.
    fn implied_rate(&self, curve: &DiscountCurve) -> CurveResult<f64>;

    /// Every date at which the instrument reads the curve.
    fn reference_dates(&self) -> Vec<Date>;

    /// Last date at which the instrument reads the curve.
    fn maturity(&self) -> Date;

    /// Curve node this instrument calibrates.
    fn pillar_date(&self) -> Date {
        self.maturity()
    }

    /// Market quote.
    fn quote(&self) -> &Quote;

    /// Human-readable label, e.g. `"Swap 5Y 2.9205%"`.
    fn description(&self) -> String;

    /// `implied_rate - quote`.
    fn residual(&self, curve: &DiscountCurve) -> CurveResult<f64> {
        Ok(self.implied_rate(curve)? - self.quote().rate())
    }
}

/// A curve instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    /// Money market deposit.
    Deposit(Deposit),
    /// Vanilla swap.
    Swap(Swap),
}

impl Instrument {
    fn inner(&self) -> &dyn RateInstrument {
        match self {
            Self::Deposit(deposit) => deposit,
            Self::Swap(swap) => swap,
        }
    }
}

impl RateInstrument for Instrument {
    fn implied_rate(&self, curve: &DiscountCurve) -> CurveResult<f64> {
        self.inner().implied_rate(curve)
    }

    fn reference_dates(&self) -> Vec<Date> {
        self.inner().reference_dates()
    }

    fn maturity(&self) -> Date {
        self.inner().maturity()
    }

    fn pillar_date(&self) -> Date {
        self.inner().pillar_date()
    }

    fn quote(&self) -> &Quote {
        self.inner().quote()
    }

    fn description(&self) -> String {
        self.inner().description()
    }
}

impl From<Deposit> for Instrument {
    fn from(deposit: Deposit) -> Self {
        Self::Deposit(deposit)
    }
}

impl From<Swap> for Instrument {
    fn from(swap: Swap) -> Self {
        Self::Swap(swap)
    }
}

/// Instruments to calibrate, each with a least-squares weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentSet {
    instruments: Vec<Instrument>,
    weights: Vec<f64>,
}

impl InstrumentSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instrument with unit weight.
    pub fn push(&mut self, instrument: impl Into<Instrument>) {
        self.instruments.push(instrument.into());
        self.weights.push(1.0);
    }

    /// Adds an instrument with a least-squares weight.
    pub fn push_weighted(&mut self, instrument: impl Into<Instrument>, weight: f64) -> CurveResult<()> {
        if !(weight >= 0.0 && weight.is_finite()) {
            return Err(CurveError::invalid_instrument(format!(
                "weight {weight} must be finite and non-negative"
            )));
        }
        self.instruments.push(instrument.into());
        self.weights.push(weight);
        Ok(())
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// True if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Instruments in insertion order.
    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Weights, aligned with [`instruments`](Self::instruments).
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterates over instruments.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Copy of the set stably sorted by pillar date.
    #[must_use]
    pub fn sorted_by_maturity(&self) -> Self {
        let mut pairs: Vec<(Instrument, f64)> = self
            .instruments
            .iter()
            .cloned()
            .zip(self.weights.iter().copied())
            .collect();
        pairs.sort_by_key(|(instrument, _)| instrument.pillar_date());
        let (instruments, weights) = pairs.into_iter().unzip();
        Self {
            instruments,
            weights,
        }
    }

    /// Distinct pillar dates in increasing order.
    #[must_use]
    pub fn pillar_dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.iter().map(RateInstrument::pillar_date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

impl<I: Into<Instrument>> FromIterator<I> for InstrumentSet {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut set = Self::new();
        for instrument in iter {
            set.push(instrument);
        }
        set
    }
}

impl<'a> IntoIterator for &'a InstrumentSet {
    type Item = &'a Instrument;
    type IntoIter = std::slice::Iter<'a, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.instruments.iter()
    }
}
