//! Curve bootstrapping.
//!
//! Two strategies share the [`CurveSolver`] interface:
//!
//! - [`SequentialSolver`]: node-by-node, solving each pillar's zero rate with
//!   a bracketed root search while earlier nodes stay fixed
//! - [`GlobalSolver`]: all pillar zero rates at once by weighted
//!   Levenberg-Marquardt least squares; handles overdetermined sets and
//!   instruments sharing a maturity
//!
//! On exactly determined sets both produce the same curve.

mod global;
mod sequential;

pub use global::GlobalSolver;
pub use sequential::{RootSearch, SequentialSolver};

use std::fmt;
use std::str::FromStr;

use kurva_core::Date;
use serde::{Deserialize, Serialize};

use crate::curve::{CurveTemplate, DiscountCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::InstrumentSet;
use crate::repricing::RepricingReport;

/// A curve construction strategy.
pub trait CurveSolver: Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Solves a curve that reprices `instruments`.
    fn solve(&self, template: &CurveTemplate, instruments: &InstrumentSet) -> CurveResult<BootstrapResult>;
}

/// Which solver a [`CurveBuilder`](crate::builder::CurveBuilder) dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapMethod {
    /// [`SequentialSolver`].
    #[default]
    Sequential,
    /// [`GlobalSolver`].
    GlobalLeastSquares,
}

impl fmt::Display for BootstrapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::GlobalLeastSquares => write!(f, "global_least_squares"),
        }
    }
}

impl FromStr for BootstrapMethod {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "sequential" | "iterative" => Ok(Self::Sequential),
            "global_least_squares" | "global" | "least_squares" => Ok(Self::GlobalLeastSquares),
            _ => Err(CurveError::config(format!("unknown bootstrap method: '{s}'"))),
        }
    }
}

/// Working state of a solver: node guesses and per-instrument residuals.
///
/// Lives only for the duration of a solve and is consumed by
/// [`into_result`](Self::into_result).
#[derive(Debug, Clone, Default)]
pub struct SolverState {
    /// Node dates solved so far, increasing.
    pub node_dates: Vec<Date>,
    /// Continuously compounded zero rates at `node_dates`.
    pub zero_rates: Vec<f64>,
    /// Latest `implied - quote` per instrument.
    pub residuals: Vec<f64>,
    /// Iterations spent so far.
    pub iterations: u32,
}

impl SolverState {
    /// Empty state sized for `instruments` instruments.
    #[must_use]
    pub fn with_capacity(instruments: usize) -> Self {
        Self {
            node_dates: Vec::with_capacity(instruments),
            zero_rates: Vec::with_capacity(instruments),
            residuals: Vec::with_capacity(instruments),
            iterations: 0,
        }
    }

    /// Current nodes as `(date, zero rate)` pairs.
    #[must_use]
    pub fn nodes(&self) -> Vec<(Date, f64)> {
        self.node_dates.iter().copied().zip(self.zero_rates.iter().copied()).collect()
    }

    /// Builds the final curve and reprices the inputs on it.
    pub fn into_result(
        self,
        template: &CurveTemplate,
        instruments: &InstrumentSet,
        tolerance_bp: f64,
    ) -> CurveResult<BootstrapResult> {
        let curve = DiscountCurve::from_zero_rates(*template, &self.nodes())?;
        let report = RepricingReport::new(&curve, instruments, tolerance_bp)?;
        Ok(BootstrapResult {
            curve,
            iterations: self.iterations,
            report,
        })
    }
}

/// A solved curve with its repricing report.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// The solved curve.
    pub curve: DiscountCurve,
    /// Total solver iterations.
    pub iterations: u32,
    /// Repricing of the input instruments.
    pub report: RepricingReport,
}

impl BootstrapResult {
    /// True if every input reprices within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}
