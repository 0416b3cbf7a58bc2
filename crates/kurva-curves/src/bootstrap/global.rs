//! Global least-squares bootstrap.

use std::cell::RefCell;

use kurva_core::Date;
use kurva_math::optimization::{LeastSquaresConfig, LevenbergMarquardt};
use kurva_math::MathError;
use nalgebra::DVector;
use tracing::{debug, info, info_span, warn};

use super::{BootstrapResult, CurveSolver, SolverState};
use crate::curve::{CurveTemplate, DiscountCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{InstrumentSet, RateInstrument};
use crate::repricing::DEFAULT_TOLERANCE_BP;

/// Fits the zero rates at every distinct pillar simultaneously.
///
/// Minimizes `Σ wᵢ (implied_i - quote_i)²` over the pillar zero rates with
/// Levenberg-Marquardt (Gauss-Newton when the damping is zero). Instrument
/// order does not matter, several instruments may share a pillar, and the
/// set may hold more instruments than pillars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalSolver {
    config: LeastSquaresConfig,
    tolerance_bp: f64,
}

impl Default for GlobalSolver {
    fn default() -> Self {
        Self {
            config: LeastSquaresConfig::default(),
            tolerance_bp: DEFAULT_TOLERANCE_BP,
        }
    }
}

impl GlobalSolver {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Undamped Gauss-Newton.
    #[must_use]
    pub fn gauss_newton() -> Self {
        Self::default().with_config(LeastSquaresConfig::gauss_newton())
    }

    /// Replaces the least-squares configuration.
    #[must_use]
    pub fn with_config(mut self, config: LeastSquaresConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Sets the iteration limit.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Sets the repricing tolerance in basis points.
    #[must_use]
    pub fn with_repricing_tolerance(mut self, tolerance_bp: f64) -> Self {
        self.tolerance_bp = tolerance_bp;
        self
    }

    /// Starting zero rate for each pillar: the quote of its first instrument.
    fn initial_guess(pillars: &[Date], instruments: &InstrumentSet) -> DVector<f64> {
        DVector::from_iterator(
            pillars.len(),
            pillars.iter().map(|&pillar| {
                instruments
                    .iter()
                    .find(|i| i.pillar_date() == pillar)
                    .map_or(0.0, |i| i.quote().rate())
            }),
        )
    }

    /// First pillar whose instruments all carry zero weight.
    fn unconstrained_pillar(pillars: &[Date], instruments: &InstrumentSet) -> Option<Date> {
        pillars.iter().copied().find(|&pillar| {
            instruments
                .iter()
                .zip(instruments.weights())
                .filter(|(instrument, _)| instrument.pillar_date() == pillar)
                .all(|(_, &weight)| weight <= 0.0)
        })
    }
}

impl CurveSolver for GlobalSolver {
    fn name(&self) -> &'static str {
        "global_least_squares"
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

        let pillars = instruments.pillar_dates();
        if let Some(instrument) = instruments
            .iter()
            .find(|i| i.pillar_date() <= template.valuation_date)
        {
            return Err(CurveError::invalid_instrument(format!(
                "{} has pillar {} on or before the valuation date",
                instrument.description(),
                instrument.pillar_date()
            )));
        }
        if let Some(pillar) = Self::unconstrained_pillar(&pillars, instruments) {
            return Err(CurveError::invalid_data(format!(
                "pillar {pillar} has no instrument with positive weight"
            )));
        }
        debug!(pillars = pillars.len(), "fitting pillar zero rates");

        let failure: RefCell<Option<CurveError>> = RefCell::new(None);
        let residuals = |x: &DVector<f64>| {
            let nodes: Vec<(Date, f64)> = pillars.iter().copied().zip(x.iter().copied()).collect();
            let evaluated = DiscountCurve::from_zero_rates(*template, &nodes).and_then(|curve| {
                instruments
                    .iter()
                    .map(|instrument| instrument.residual(&curve))
                    .collect::<CurveResult<Vec<f64>>>()
            });
            match evaluated {
                Ok(r) => Ok(DVector::from_vec(r)),
                Err(err) => {
                    let reason = err.to_string();
                    failure.borrow_mut().get_or_insert(err);
                    Err(MathError::invalid_input(reason))
                }
            }
        };

        let weights = DVector::from_column_slice(instruments.weights());
        let outcome = LevenbergMarquardt::new(self.config).minimize(
            residuals,
            Self::initial_guess(&pillars, instruments),
            Some(&weights),
        );

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        let fit = outcome.map_err(|err| match CurveError::from(err) {
            CurveError::ConvergenceFailure {
                iterations,
                residual,
                message,
            } => CurveError::convergence_failure(
                iterations,
                residual,
                format!("global fit over {} pillars: {message}", pillars.len()),
            ),
            other => other,
        })?;

        info!(
            pillars = pillars.len(),
            iterations = fit.iterations,
            residual_norm = fit.weighted_norm,
            "global bootstrap converged"
        );

        let state = SolverState {
            node_dates: pillars,
            zero_rates: fit.parameters.iter().copied().collect(),
            residuals: fit.residuals.iter().copied().collect(),
            iterations: fit.iterations,
        };
        let result = state.into_result(template, instruments, self.tolerance_bp)?;
        if !result.is_valid() {
            warn!(
                max_error_bp = result.report.max_abs_error_bp(),
                "least-squares curve does not reprice all inputs exactly"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::SequentialSolver;
    use crate::instruments::{Deposit, DepositConventions, Swap, SwapConventions};
    use crate::quote::Quote;
    use approx::assert_relative_eq;
    use kurva_core::Tenor;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn swap(valuation: Date, years: i32, quote: i64) -> Swap {
        Swap::new(
            valuation,
            Tenor::years(years),
            Quote::percent(Decimal::new(quote, 4)).unwrap(),
            SwapConventions::default(),
        )
        .unwrap()
    }

    fn exact_set(valuation: Date) -> InstrumentSet {
        let mut set = InstrumentSet::new();
        set.push(
            Deposit::new(
                valuation,
                Tenor::months(6),
                Quote::percent(Decimal::new(3218, 3)).unwrap(),
                DepositConventions::default(),
            )
            .unwrap(),
        );
        set.push(swap(valuation, 1, 35227));
        set.push(swap(valuation, 2, 33070));
        set.push(swap(valuation, 5, 29205));
        set
    }

    #[test]
    fn test_agrees_with_sequential_on_exact_set() {
        let valuation = d(2023, 1, 11);
        let set = exact_set(valuation);
        let template = CurveTemplate::new(valuation);

        let sequential = SequentialSolver::new().solve(&template, &set).unwrap();
        let global = GlobalSolver::new().solve(&template, &set).unwrap();

        assert!(global.is_valid(), "{}", global.report);
        for (a, b) in sequential.curve.nodes().iter().zip(global.curve.nodes()) {
            assert_eq!(a.0, b.0);
            assert_relative_eq!(a.1, b.1, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_gauss_newton_converges() {
        let valuation = d(2023, 1, 11);
        let set = exact_set(valuation);
        let result = GlobalSolver::gauss_newton()
            .solve(&CurveTemplate::new(valuation), &set)
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_order_does_not_matter() {
        let valuation = d(2023, 1, 11);
        let set = exact_set(valuation);
        let reversed: InstrumentSet = set.instruments().iter().rev().cloned().collect();
        let template = CurveTemplate::new(valuation);

        let a = GlobalSolver::new().solve(&template, &set).unwrap();
        let b = GlobalSolver::new().solve(&template, &reversed).unwrap();
        for (x, y) in a.curve.nodes().iter().zip(b.curve.nodes()) {
            assert_relative_eq!(x.1, y.1, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_shared_pillar_fits_weighted_mean() {
        let valuation = d(2023, 1, 11);
        let mut set = InstrumentSet::new();
        set.push_weighted(swap(valuation, 2, 33000), 1.0).unwrap();
        set.push_weighted(swap(valuation, 2, 34000), 3.0).unwrap();

        let result = GlobalSolver::new()
            .solve(&CurveTemplate::new(valuation), &set)
            .unwrap();

        // One pillar, two quotes: the fitted par rate is the weighted mean
        assert_eq!(result.curve.pillar_dates().len(), 1);
        let par = set.instruments()[0].implied_rate(&result.curve).unwrap();
        assert_relative_eq!(par, 0.03375, epsilon = 1e-9);
        assert!(!result.is_valid());
        assert_relative_eq!(result.report.max_abs_error_bp(), 7.5, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_weight_pillar_rejected() {
        let valuation = d(2023, 1, 11);
        let mut set = InstrumentSet::new();
        set.push_weighted(swap(valuation, 1, 35227), 1.0).unwrap();
        set.push_weighted(swap(valuation, 2, 33070), 0.0).unwrap();
        let template = CurveTemplate::new(valuation);

        for solver in [GlobalSolver::new(), GlobalSolver::gauss_newton()] {
            let err = solver.solve(&template, &set).unwrap_err();
            assert!(matches!(err, CurveError::InvalidData { .. }), "{err}");
            assert!(err.to_string().contains("2025-01-13"), "{err}");
        }

        // A zero weight is fine when another quote pins the same pillar
        set.push_weighted(swap(valuation, 2, 33100), 1.0).unwrap();
        assert!(GlobalSolver::new().solve(&template, &set).is_ok());
    }

    #[test]
    fn test_iteration_limit_reported() {
        let valuation = d(2023, 1, 11);
        let err = GlobalSolver::new()
            .with_max_iterations(1)
            .with_tolerance(1e-30)
            .solve(&CurveTemplate::new(valuation), &exact_set(valuation))
            .unwrap_err();
        assert!(matches!(err, CurveError::ConvergenceFailure { .. }), "{err}");
    }
}
