//! Newton-Raphson root finding.
//!
//! [`newton_raphson`] and the Newton phase of [`hybrid`](super::hybrid)
//! share one iteration.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Smallest derivative magnitude a Newton step divides by.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Newton-Raphson with an analytical derivative.
///
/// Stops when `|f(x)|` or the last step is below the tolerance. Fails fast
/// on a vanishing derivative, a non-finite iterate, or a residual that more
/// than doubles between steps.
///
/// ```rust
/// use kurva_math::solvers::{newton_raphson, SolverConfig};
///
/// // Zero rate z with exp(-z) = 0.97
/// let f = |z: f64| (-z).exp() - 0.97;
/// let df = |z: f64| -(-z).exp();
/// let result = newton_raphson(f, df, 0.0, &SolverConfig::default()).unwrap();
/// assert!((result.root + 0.97_f64.ln()).abs() < 1e-12);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    newton_steps(&f, &df, initial_guess, None, config.max_iterations, config)
}

/// [`newton_raphson`] with a central-difference derivative.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let df = |x: f64| central_difference(&f, x);
    newton_raphson(&f, df, initial_guess, config)
}

/// Newton iteration capped at `max_steps`, optionally confined to `bounds`.
pub(crate) fn newton_steps<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    max_steps: u32,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut last_residual = f64::INFINITY;

    for iteration in 0..max_steps {
        let fx = f(x);
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }
        if fx.abs() > 2.0 * last_residual {
            return Err(MathError::invalid_input(format!(
                "Newton-Raphson diverging at x = {x}"
            )));
        }
        last_residual = fx.abs();

        let slope = df(x);
        if slope.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: slope });
        }

        let step = fx / slope;
        x -= step;
        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton-Raphson produced a non-finite iterate"));
        }
        if let Some((a, b)) = bounds {
            if x < a.min(b) || x > a.max(b) {
                return Err(MathError::invalid_input(format!(
                    "Newton-Raphson left [{}, {}]",
                    a.min(b),
                    a.max(b)
                )));
            }
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(max_steps, f(x).abs()))
}

/// Central-difference first derivative with a step scaled to `x`.
pub(crate) fn central_difference<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = 1e-7 * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}
