//! Fluent curve construction.

use kurva_core::daycounts::DayCountConvention;
use kurva_core::{Date, Tenor};
use rayon::prelude::*;
use tracing::info;

use crate::bootstrap::{
    BootstrapMethod, BootstrapResult, CurveSolver, GlobalSolver, RootSearch, SequentialSolver,
};
use crate::curve::{CurveTemplate, Interpolation};
use crate::error::CurveResult;
use crate::instruments::{
    Deposit, DepositConventions, Instrument, InstrumentSet, Swap, SwapConventions,
};
use crate::quote::Quote;

/// Collects a curve template and instruments, then dispatches to the solver
/// selected by [`BootstrapMethod`].
///
/// # Example
///
/// ```rust
/// use kurva_core::{Date, Tenor};
/// use kurva_curves::prelude::*;
/// use rust_decimal::Decimal;
///
/// let result = CurveBuilder::new(Date::from_ymd(2023, 1, 11).unwrap())
///     .deposit(Tenor::months(6), Quote::percent(Decimal::new(3218, 3)).unwrap(), DepositConventions::default())
///     .unwrap()
///     .swap(Tenor::years(1), Quote::percent(Decimal::new(35227, 4)).unwrap(), SwapConventions::default())
///     .unwrap()
///     .with_method(BootstrapMethod::GlobalLeastSquares)
///     .build()
///     .unwrap();
///
/// assert!(result.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct CurveBuilder {
    name: Option<String>,
    template: CurveTemplate,
    method: BootstrapMethod,
    root_search: RootSearch,
    tolerance: f64,
    max_iterations: u32,
    instruments: InstrumentSet,
}

impl CurveBuilder {
    /// Creates a builder with default template and sequential solving.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self::with_template(CurveTemplate::new(valuation_date))
    }

    /// Creates a builder from a template.
    #[must_use]
    pub fn with_template(template: CurveTemplate) -> Self {
        Self {
            name: None,
            template,
            method: BootstrapMethod::default(),
            root_search: RootSearch::default(),
            tolerance: 1e-12,
            max_iterations: 100,
            instruments: InstrumentSet::new(),
        }
    }

    /// Sets a name used in log output.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the interpolation.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.template.interpolation = interpolation;
        self
    }

    /// Sets the curve time day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.template.day_count = day_count;
        self
    }

    /// Enables or disables flat-forward extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.template.allow_extrapolation = allow;
        self
    }

    /// Sets the bootstrap method.
    #[must_use]
    pub fn with_method(mut self, method: BootstrapMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the root search of the sequential solver.
    #[must_use]
    pub fn with_root_search(mut self, root_search: RootSearch) -> Self {
        self.root_search = root_search;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the solver iteration limit.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Adds an instrument with unit weight.
    #[must_use]
    pub fn add(mut self, instrument: impl Into<Instrument>) -> Self {
        self.instruments.push(instrument);
        self
    }

    /// Adds an instrument with a least-squares weight.
    pub fn add_weighted(mut self, instrument: impl Into<Instrument>, weight: f64) -> CurveResult<Self> {
        self.instruments.push_weighted(instrument, weight)?;
        Ok(self)
    }

    /// Adds a deposit starting from the builder's valuation date.
    pub fn deposit(self, tenor: Tenor, quote: Quote, conventions: DepositConventions) -> CurveResult<Self> {
        let deposit = Deposit::new(self.template.valuation_date, tenor, quote, conventions)?;
        Ok(self.add(deposit))
    }

    /// Adds a spot-starting swap.
    pub fn swap(self, tenor: Tenor, quote: Quote, conventions: SwapConventions) -> CurveResult<Self> {
        let swap = Swap::new(self.template.valuation_date, tenor, quote, conventions)?;
        Ok(self.add(swap))
    }

    /// Returns the template.
    #[must_use]
    pub fn template(&self) -> &CurveTemplate {
        &self.template
    }

    /// Returns the instruments added so far.
    #[must_use]
    pub fn instruments(&self) -> &InstrumentSet {
        &self.instruments
    }

    /// Returns the bootstrap method.
    #[must_use]
    pub fn method(&self) -> BootstrapMethod {
        self.method
    }

    /// The solver [`build`](Self::build) will use.
    #[must_use]
    pub fn solver(&self) -> Box<dyn CurveSolver> {
        match self.method {
            BootstrapMethod::Sequential => Box::new(
                SequentialSolver::new()
                    .with_tolerance(self.tolerance)
                    .with_max_iterations(self.max_iterations)
                    .with_root_search(self.root_search),
            ),
            BootstrapMethod::GlobalLeastSquares => Box::new(
                GlobalSolver::new()
                    .with_tolerance(self.tolerance)
                    .with_max_iterations(self.max_iterations),
            ),
        }
    }

    /// Solves the curve.
    pub fn build(&self) -> CurveResult<BootstrapResult> {
        let solver = self.solver();
        info!(
            curve = self.name.as_deref().unwrap_or("unnamed"),
            solver = solver.name(),
            instruments = self.instruments.len(),
            "building curve"
        );
        solver.solve(&self.template, &self.instruments)
    }
}

/// Builds independent curves on the rayon thread pool.
///
/// Results are returned in input order.
pub fn build_curves_parallel(builders: &[CurveBuilder]) -> Vec<CurveResult<BootstrapResult>> {
    builders.par_iter().map(CurveBuilder::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use crate::instruments::RateInstrument;
    use approx::assert_relative_eq;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn sek_builder(valuation: Date) -> CurveBuilder {
        let mut builder = CurveBuilder::new(valuation)
            .with_name("SEK")
            .deposit(
                Tenor::months(6),
                Quote::percent(Decimal::new(3218, 3)).unwrap(),
                DepositConventions::default(),
            )
            .unwrap();
        for (years, quote) in [(1, 35227), (2, 33070), (3, 31140)] {
            builder = builder
                .swap(
                    Tenor::years(years),
                    Quote::percent(Decimal::new(quote, 4)).unwrap(),
                    SwapConventions::default(),
                )
                .unwrap();
        }
        builder
    }

    #[test]
    fn test_builder_dispatches_on_method() {
        let builder = sek_builder(d(2023, 1, 11));
        assert_eq!(builder.solver().name(), "sequential");
        let builder = builder.with_method(BootstrapMethod::GlobalLeastSquares);
        assert_eq!(builder.solver().name(), "global_least_squares");
        assert!(builder.build().unwrap().is_valid());
    }

    #[test]
    fn test_builder_template_settings() {
        let builder = CurveBuilder::new(d(2023, 1, 11))
            .with_interpolation(Interpolation::LinearZero)
            .with_day_count(DayCountConvention::Act360)
            .with_extrapolation(true);
        let template = builder.template();
        assert_eq!(template.interpolation, Interpolation::LinearZero);
        assert_eq!(template.day_count, DayCountConvention::Act360);
        assert!(template.allow_extrapolation);
    }

    #[test]
    fn test_linear_zero_curve_reprices() {
        let result = sek_builder(d(2023, 1, 11))
            .with_interpolation(Interpolation::LinearZero)
            .build()
            .unwrap();
        assert!(result.is_valid(), "{}", result.report);
    }

    #[test]
    fn test_parallel_builds_match_serial() {
        let builders: Vec<CurveBuilder> = [d(2023, 1, 11), d(2023, 1, 12), d(2023, 1, 16)]
            .into_iter()
            .map(sek_builder)
            .collect();

        let parallel = build_curves_parallel(&builders);
        assert_eq!(parallel.len(), 3);

        for (builder, result) in builders.iter().zip(parallel) {
            let parallel_curve = result.unwrap().curve;
            let serial_curve = builder.build().unwrap().curve;
            assert_eq!(parallel_curve.valuation_date(), builder.template().valuation_date);
            for (a, b) in parallel_curve.nodes().iter().zip(serial_curve.nodes()) {
                assert_relative_eq!(a.1, b.1, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_empty_builder_fails() {
        let err = CurveBuilder::new(d(2023, 1, 11)).build().unwrap_err();
        assert!(matches!(err, CurveError::InvalidData { .. }));
    }

    #[test]
    fn test_quotes_survive_builder() {
        let builder = sek_builder(d(2023, 1, 11));
        let quotes: Vec<f64> = builder.instruments().iter().map(|i| i.quote().rate()).collect();
        assert_relative_eq!(quotes[0], 0.03218, epsilon = 1e-16);
        assert_eq!(quotes.len(), 4);
    }
}
