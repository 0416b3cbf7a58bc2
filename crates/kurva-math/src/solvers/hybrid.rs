//! Newton-Raphson with a Brent fallback.

use crate::error::{MathError, MathResult};
use crate::solvers::newton::{central_difference, newton_steps};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Newton iterations cut short before falling back.
const NEWTON_ITERATIONS: u32 = 20;

/// Tries Newton-Raphson from `initial_guess`, switching to Brent if Newton
/// stalls, diverges or leaves `bounds`.
///
/// Without `bounds`, a bracket is searched for around the initial guess.
///
/// ```rust
/// use kurva_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-9);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let steps = config.max_iterations.min(NEWTON_ITERATIONS);
    match newton_steps(&f, &df, initial_guess, bounds, steps, config) {
        Ok(result) => Ok(result),
        Err(err) => {
            log::debug!("newton failed from {initial_guess} ({err}), falling back to brent");
            let (a, b) = match bounds {
                Some(bounds) => bounds,
                None => find_bracket(&f, initial_guess).ok_or_else(|| {
                    MathError::invalid_input(
                        "Newton-Raphson failed and no bracketing interval was found",
                    )
                })?,
            };
            brent(&f, a, b, config)
        }
    }
}

/// [`hybrid`] with a central-difference derivative.
pub fn hybrid_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let df = |x: f64| central_difference(&f, x);
    hybrid(&f, df, initial_guess, bounds, config)
}

/// Expands an interval around `guess` until the function changes sign.
fn find_bracket<F>(f: &F, guess: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let mut width = 0.01_f64.max(guess.abs() * 0.1);
    for _ in 0..50 {
        let (a, b) = (guess - width, guess + width);
        if f(a) * f(b) <= 0.0 {
            return Some((a, b));
        }
        width *= 1.6;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newton_path() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_fallback_on_flat_derivative() {
        // Newton from x = 0 hits a zero derivative
        let f = |x: f64| x * x * x - 8.0;
        let df = |x: f64| 3.0 * x * x;
        let result = hybrid(f, df, 0.0, Some((0.0, 3.0)), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fallback_without_bounds() {
        let f = |x: f64| x.atan();
        let result = hybrid_numerical(f, 2.0, None, &SolverConfig::default()).unwrap();
        assert!(result.root.abs() < 1e-9);
    }
}
