//! Repricing of input instruments against a solved curve.
//!
//! Every solve ends by repricing its inputs. A curve that does not reproduce
//! its quotes within tolerance is flagged in the report; callers decide what
//! to do with it.

use std::fmt;

use kurva_core::Date;

use crate::curve::DiscountCurve;
use crate::error::CurveResult;
use crate::instruments::{InstrumentSet, RateInstrument};

/// Default repricing tolerance in basis points.
pub const DEFAULT_TOLERANCE_BP: f64 = 1e-4;

/// Repricing of one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingCheck {
    /// Instrument description.
    pub instrument: String,
    /// Pillar date.
    pub pillar: Date,
    /// Quoted rate (decimal).
    pub quoted_rate: f64,
    /// Rate implied by the curve (decimal).
    pub implied_rate: f64,
    /// `(implied - quoted) × 10 000`.
    pub error_bp: f64,
}

/// Repricing of every input instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    tolerance_bp: f64,
}

impl RepricingReport {
    /// Reprices `instruments` on `curve`.
    pub fn new(curve: &DiscountCurve, instruments: &InstrumentSet, tolerance_bp: f64) -> CurveResult<Self> {
        let checks = instruments
            .iter()
            .map(|instrument| {
                let implied_rate = instrument.implied_rate(curve)?;
                let quoted_rate = instrument.quote().rate();
                Ok(RepricingCheck {
                    instrument: instrument.description(),
                    pillar: instrument.pillar_date(),
                    quoted_rate,
                    implied_rate,
                    error_bp: (implied_rate - quoted_rate) * 10_000.0,
                })
            })
            .collect::<CurveResult<Vec<_>>>()?;

        Ok(Self { checks, tolerance_bp })
    }

    /// Per-instrument checks in input order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Tolerance in basis points.
    #[must_use]
    pub fn tolerance_bp(&self) -> f64 {
        self.tolerance_bp
    }

    /// True if every instrument reprices within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.error_bp.abs() <= self.tolerance_bp)
    }

    /// Checks outside tolerance.
    pub fn failed(&self) -> impl Iterator<Item = &RepricingCheck> {
        self.checks.iter().filter(|c| c.error_bp.abs() > self.tolerance_bp)
    }

    /// Largest absolute repricing error in basis points.
    #[must_use]
    pub fn max_abs_error_bp(&self) -> f64 {
        self.checks.iter().map(|c| c.error_bp.abs()).fold(0.0, f64::max)
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:>10} {:>10} {:>10} {:>12}",
            "Instrument", "Pillar", "Quote %", "Implied %", "Error bp"
        )?;
        for check in &self.checks {
            writeln!(
                f,
                "{:<24} {:>10} {:>10.5} {:>10.5} {:>12.2e}",
                check.instrument,
                check.pillar.to_string(),
                check.quoted_rate * 100.0,
                check.implied_rate * 100.0,
                check.error_bp
            )?;
        }
        write!(
            f,
            "max |error| = {:.2e} bp (tolerance {:.0e} bp)",
            self.max_abs_error_bp(),
            self.tolerance_bp
        )
    }
}
