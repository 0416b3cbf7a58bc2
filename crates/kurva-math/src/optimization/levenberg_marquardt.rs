//! Levenberg-Marquardt iteration on `nalgebra`.

use nalgebra::{DMatrix, DVector};

use super::{LeastSquaresConfig, LeastSquaresResult};
use crate::error::{MathError, MathResult};

/// Weighted Levenberg-Marquardt / Gauss-Newton solver.
///
/// # Example
///
/// ```rust
/// use kurva_math::optimization::{LeastSquaresConfig, LevenbergMarquardt};
/// use nalgebra::DVector;
///
/// // Fit y = a·exp(b·t) through three exact points
/// let ts = [0.0, 1.0, 2.0];
/// let ys: Vec<f64> = ts.iter().map(|t: &f64| 2.0 * (0.5 * t).exp()).collect();
/// let residuals = |p: &DVector<f64>| {
///     Ok(DVector::from_iterator(3, ts.iter().zip(&ys).map(|(t, y)| p[0] * (p[1] * t).exp() - y)))
/// };
///
/// let solver = LevenbergMarquardt::new(LeastSquaresConfig::default().with_tolerance(1e-10));
/// let fit = solver.minimize(residuals, DVector::from_vec(vec![1.0, 0.1]), None).unwrap();
/// assert!((fit.parameters[0] - 2.0).abs() < 1e-8);
/// assert!((fit.parameters[1] - 0.5).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenbergMarquardt {
    config: LeastSquaresConfig,
}

impl LevenbergMarquardt {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: LeastSquaresConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LeastSquaresConfig {
        &self.config
    }

    /// Minimizes `Σ wᵢ rᵢ(x)²` starting from `initial`.
    ///
    /// `weights` defaults to the identity. Converges when the weighted
    /// residual norm or the step norm drops below the tolerance.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` when there are fewer residuals than parameters
    /// - `DimensionMismatch` when `weights` has the wrong length
    /// - `SingularMatrix` when the normal equations cannot be solved
    /// - `ConvergenceFailed` after `max_iterations`
    /// - any error returned by `residual_fn`
    pub fn minimize<F>(
        &self,
        residual_fn: F,
        initial: DVector<f64>,
        weights: Option<&DVector<f64>>,
    ) -> MathResult<LeastSquaresResult>
    where
        F: Fn(&DVector<f64>) -> MathResult<DVector<f64>>,
    {
        let config = &self.config;
        let n = initial.len();

        let mut x = initial;
        let mut r = residual_fn(&x)?;
        let m = r.len();

        if m < n || n == 0 {
            return Err(MathError::insufficient_data(n.max(1), m));
        }

        let w = match weights {
            Some(w) if w.len() != m => return Err(MathError::dimension_mismatch(m, w.len())),
            Some(w) if w.iter().any(|&wi| !(wi >= 0.0) || !wi.is_finite()) => {
                return Err(MathError::invalid_input("weights must be finite and non-negative"))
            }
            Some(w) => w.clone(),
            None => DVector::from_element(m, 1.0),
        };

        let mut cost = weighted_cost(&r, &w);
        let mut lambda = config.initial_lambda;

        for iteration in 0..config.max_iterations {
            let norm = cost.sqrt();
            if norm < config.tolerance {
                log::debug!("least squares converged: |r|_W = {norm:.3e} after {iteration} iterations");
                return Ok(finish(x, r, norm, iteration));
            }

            let jacobian = numerical_jacobian(&residual_fn, &x, config.jacobian_step)?;
            let weighted_j = scale_rows(&jacobian, &w);
            let jtwj = jacobian.transpose() * &weighted_j;
            let jtwr = weighted_j.transpose() * &r;

            let mut system = jtwj.clone();
            if lambda > 0.0 {
                for k in 0..n {
                    system[(k, k)] += lambda * jtwj[(k, k)].max(f64::EPSILON);
                }
            }

            let delta = solve_symmetric(system, -jtwr)?;
            let step_norm = delta.norm();

            let candidate = &x + &delta;
            let candidate_r = residual_fn(&candidate)?;
            let candidate_cost = weighted_cost(&candidate_r, &w);

            log::trace!(
                "iteration {iteration}: |r|_W = {norm:.3e}, |δ| = {step_norm:.3e}, λ = {lambda:.1e}"
            );

            let improved = candidate_cost <= cost;
            if !improved && lambda > 0.0 {
                lambda = (lambda * config.lambda_factor).min(config.max_lambda);
                continue;
            }

            x = candidate;
            r = candidate_r;
            cost = candidate_cost;
            if lambda > 0.0 {
                lambda = (lambda / config.lambda_factor).max(config.min_lambda);
            }

            // Only an accepted step can signal convergence
            if step_norm < config.tolerance {
                let norm = cost.sqrt();
                log::debug!(
                    "least squares converged on step size: |r|_W = {norm:.3e} after {} iterations",
                    iteration + 1
                );
                return Ok(finish(x, r, norm, iteration + 1));
            }
        }

        Err(MathError::convergence_failed(config.max_iterations, cost.sqrt()))
    }
}

/// Central-difference Jacobian `∂rᵢ/∂xⱼ` with bumps `step·max(1, |xⱼ|)`.
pub fn numerical_jacobian<F>(residual_fn: &F, x: &DVector<f64>, step: f64) -> MathResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> MathResult<DVector<f64>>,
{
    let n = x.len();
    let mut columns = Vec::with_capacity(n);

    for j in 0..n {
        let h = step * x[j].abs().max(1.0);

        let mut up = x.clone();
        up[j] += h;
        let mut down = x.clone();
        down[j] -= h;

        let r_up = residual_fn(&up)?;
        let r_down = residual_fn(&down)?;
        if r_up.len() != r_down.len() {
            return Err(MathError::dimension_mismatch(r_up.len(), r_down.len()));
        }
        columns.push((r_up - r_down) / (2.0 * h));
    }

    Ok(DMatrix::from_columns(&columns))
}

fn weighted_cost(r: &DVector<f64>, w: &DVector<f64>) -> f64 {
    r.iter().zip(w.iter()).map(|(ri, wi)| wi * ri * ri).sum()
}

fn scale_rows(matrix: &DMatrix<f64>, w: &DVector<f64>) -> DMatrix<f64> {
    let mut scaled = matrix.clone();
    for (i, mut row) in scaled.row_iter_mut().enumerate() {
        row *= w[i];
    }
    scaled
}

fn solve_symmetric(system: DMatrix<f64>, rhs: DVector<f64>) -> MathResult<DVector<f64>> {
    if let Some(cholesky) = system.clone().cholesky() {
        return Ok(cholesky.solve(&rhs));
    }
    system
        .lu()
        .solve(&rhs)
        .filter(|delta| delta.iter().all(|v| v.is_finite()))
        .ok_or(MathError::SingularMatrix)
}

fn finish(parameters: DVector<f64>, residuals: DVector<f64>, norm: f64, iterations: u32) -> LeastSquaresResult {
    LeastSquaresResult {
        parameters,
        residuals,
        weighted_norm: norm,
        iterations,
    }
}
