//! Nonlinear least squares.
//!
//! [`LevenbergMarquardt`] minimizes `Σ wᵢ rᵢ(x)²` for a residual function
//! `r: ℝⁿ → ℝᵐ` (m ≥ n) by solving the damped, weighted normal equations
//!
//! ```text
//! (JᵀWJ + λ·diag(JᵀWJ)) δ = -JᵀW r
//! ```
//!
//! at each step, with `J` the central-difference Jacobian. With `λ = 0` the
//! iteration is plain Gauss-Newton.

mod levenberg_marquardt;

pub use levenberg_marquardt::{numerical_jacobian, LevenbergMarquardt};

use nalgebra::DVector;

/// Configuration for [`LevenbergMarquardt`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquaresConfig {
    /// Convergence tolerance on the weighted residual norm and on the step norm.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Initial damping; zero selects Gauss-Newton.
    pub initial_lambda: f64,
    /// Factor applied to the damping after a rejected (×) or accepted (÷) step.
    pub lambda_factor: f64,
    /// Lower bound for the damping while adapting.
    pub min_lambda: f64,
    /// Upper bound for the damping while adapting.
    pub max_lambda: f64,
    /// Relative bump size for the central-difference Jacobian.
    pub jacobian_step: f64,
}

impl Default for LeastSquaresConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 100,
            initial_lambda: 1e-3,
            lambda_factor: 10.0,
            min_lambda: 1e-12,
            max_lambda: 1e12,
            jacobian_step: 1e-6,
        }
    }
}

impl LeastSquaresConfig {
    /// Undamped Gauss-Newton configuration.
    #[must_use]
    pub fn gauss_newton() -> Self {
        Self {
            initial_lambda: 0.0,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the initial damping.
    #[must_use]
    pub fn with_initial_lambda(mut self, lambda: f64) -> Self {
        self.initial_lambda = lambda;
        self
    }
}

/// Outcome of a converged least-squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresResult {
    /// Fitted parameters.
    pub parameters: DVector<f64>,
    /// Unweighted residuals at the solution.
    pub residuals: DVector<f64>,
    /// `sqrt(Σ wᵢ rᵢ²)` at the solution.
    pub weighted_norm: f64,
    /// Iterations performed.
    pub iterations: u32,
}

impl LeastSquaresResult {
    /// Largest absolute residual.
    #[must_use]
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals.amax()
    }
}
