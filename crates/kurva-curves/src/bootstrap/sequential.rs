//! Sequential (node-by-node) bootstrap.

use std::cell::RefCell;

use kurva_core::Date;
use kurva_math::solvers::{brent, hybrid_numerical, SolverConfig, SolverResult};
use tracing::{debug, info, info_span, warn};

use super::{BootstrapResult, CurveSolver, SolverState};
use crate::curve::{CurveTemplate, DiscountCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Instrument, InstrumentSet, RateInstrument};
use crate::repricing::DEFAULT_TOLERANCE_BP;

/// Root search used for each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootSearch {
    /// Brent's method on the bracket.
    #[default]
    Brent,
    /// Newton-Raphson from the previous node's zero rate, falling back to
    /// Brent on the bracket.
    Hybrid,
}

/// Bootstraps one node per instrument, in the order given.
///
/// For each instrument the nodes already solved stay fixed and the
/// continuously compounded zero rate at the instrument's pillar is solved so
/// that the implied rate equals the quote. Each pillar must lie strictly
/// after every node solved before it; use
/// [`InstrumentSet::sorted_by_maturity`] to have that arranged.
///
/// # Example
///
/// ```rust
/// use kurva_core::calendars::CalendarId;
/// use kurva_core::{Date, Tenor};
/// use kurva_curves::prelude::*;
/// use rust_decimal::Decimal;
///
/// let valuation = Date::from_ymd(2023, 1, 11).unwrap();
/// let conventions = DepositConventions::default().with_calendar(CalendarId::Target).with_fixing_lag(0);
/// let deposit = Deposit::new(valuation, Tenor::months(6), Quote::percent(Decimal::new(3218, 3)).unwrap(), conventions).unwrap();
///
/// let instruments: InstrumentSet = std::iter::once(deposit).collect();
/// let result = SequentialSolver::default().solve(&CurveTemplate::new(valuation), &instruments).unwrap();
/// assert!(result.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialSolver {
    bracket: (f64, f64),
    config: SolverConfig,
    root_search: RootSearch,
    tolerance_bp: f64,
}

impl Default for SequentialSolver {
    /// Brent on [-10%, 30%] to 1e-12 within 100 iterations.
    fn default() -> Self {
        Self {
            bracket: (-0.10, 0.30),
            config: SolverConfig::new(1e-12, 100),
            root_search: RootSearch::Brent,
            tolerance_bp: DEFAULT_TOLERANCE_BP,
        }
    }
}

impl SequentialSolver {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero-rate bracket.
    #[must_use]
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.bracket = (lower, upper);
        self
    }

    /// Sets the root search tolerance (rate units).
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Sets the iteration limit per node.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Sets the root search.
    #[must_use]
    pub fn with_root_search(mut self, root_search: RootSearch) -> Self {
        self.root_search = root_search;
        self
    }

    /// Sets the repricing tolerance in basis points.
    #[must_use]
    pub fn with_repricing_tolerance(mut self, tolerance_bp: f64) -> Self {
        self.tolerance_bp = tolerance_bp;
        self
    }

    fn solve_node(
        &self,
        template: &CurveTemplate,
        state: &SolverState,
        instrument: &Instrument,
        pillar: Date,
    ) -> CurveResult<SolverResult> {
        let failure: RefCell<Option<CurveError>> = RefCell::new(None);

        let objective = |zero: f64| {
            let mut nodes = state.nodes();
            nodes.push((pillar, zero));
            match DiscountCurve::from_zero_rates(*template, &nodes)
                .and_then(|curve| instrument.residual(&curve))
            {
                Ok(residual) => residual,
                Err(err) => {
                    failure.borrow_mut().get_or_insert(err);
                    f64::NAN
                }
            }
        };

        let (lower, upper) = self.bracket;
        let outcome = match self.root_search {
            RootSearch::Brent => brent(&objective, lower, upper, &self.config),
            RootSearch::Hybrid => {
                let guess = state
                    .zero_rates
                    .last()
                    .copied()
                    .unwrap_or_else(|| instrument.quote().rate());
                hybrid_numerical(&objective, guess, Some(self.bracket), &self.config)
            }
        };

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }

        outcome.map_err(|err| match CurveError::from(err) {
            CurveError::ConvergenceFailure {
                iterations,
                residual,
                message,
            } => CurveError::convergence_failure(
                iterations,
                residual,
                format!("{} at {pillar}: {message}", instrument.description()),
            ),
            other => other,
        })
    }
}

impl CurveSolver for SequentialSolver {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn solve(&self, template: &CurveTemplate, instruments: &InstrumentSet) -> CurveResult<BootstrapResult> {
        if instruments.is_empty() {
            return Err(CurveError::invalid_data("no instruments to bootstrap"));
        }

        let span = info_span!(
            "bootstrap",
            solver = self.name(),
            valuation = %template.valuation_date,
            instruments = instruments.len()
        );
        let _guard = span.enter();

        let mut state = SolverState::with_capacity(instruments.len());

        for instrument in instruments {
            let pillar = instrument.pillar_date();
            let last_node = state
                .node_dates
                .last()
                .copied()
                .unwrap_or(template.valuation_date);

            if pillar <= last_node {
                return Err(CurveError::out_of_order(instrument.description(), pillar, last_node));
            }

            let node = self.solve_node(template, &state, instrument, pillar)?;
            debug!(
                instrument = %instrument.description(),
                %pillar,
                zero_rate = node.root,
                iterations = node.iterations,
                "node solved"
            );

            state.node_dates.push(pillar);
            state.zero_rates.push(node.root);
            state.residuals.push(node.residual);
            state.iterations += node.iterations;
        }

        info!(
            nodes = state.node_dates.len(),
            iterations = state.iterations,
            "sequential bootstrap converged"
        );

        let result = state.into_result(template, instruments, self.tolerance_bp)?;
        if !result.is_valid() {
            warn!(
                max_error_bp = result.report.max_abs_error_bp(),
                "curve does not reprice all inputs"
            );
        }
        Ok(result)
    }
}
