//! Log-linear interpolation.

use super::{find_segment, validate, Interpolator};
use crate::error::{MathError, MathResult};

/// Interpolates `ln(y)` linearly and exponentiates.
///
/// On discount factors this gives a piecewise constant instantaneous forward
/// rate between nodes and keeps every interpolated value positive.
///
/// ```rust
/// use kurva_math::interpolation::{Interpolator, LogLinearInterpolator};
///
/// let dfs = LogLinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.97, 0.94]).unwrap();
/// let df = dfs.interpolate(1.5).unwrap();
/// assert!(df < 0.97 && df > 0.94);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    log_ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LogLinearInterpolator {
    /// Creates a log-linear interpolator; every y must be positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;

        if let Some((i, y)) = ys.iter().enumerate().find(|&(_, &y)| y <= 0.0) {
            return Err(MathError::invalid_input(format!(
                "y[{i}] = {y} is not positive; log-linear requires positive values"
            )));
        }
        let log_ys = ys.iter().map(|y| y.ln()).collect();

        Ok(Self {
            xs,
            ys,
            log_ys,
            allow_extrapolation: false,
        })
    }

    /// Extends the end segments (in log space) beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the original y values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.ys
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }

    fn log_slope(&self, i: usize) -> f64 {
        (self.log_ys[i + 1] - self.log_ys[i]) / (self.xs[i + 1] - self.xs[i])
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let i = find_segment(&self.xs, x);
        Ok((self.log_ys[i] + self.log_slope(i) * (x - self.xs[i])).exp())
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        // d/dx exp(g(x)) = g'(x) * exp(g(x))
        let y = self.interpolate(x)?;
        Ok(self.log_slope(find_segment(&self.xs, x)) * y)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_forward_between_nodes() {
        let interp =
            LogLinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![1.0, (-0.03f64).exp(), (-0.07f64).exp()])
                .unwrap();

        // -d ln(df)/dt is 3% on the first segment and 4% on the second
        for t in [0.1, 0.5, 0.9] {
            let fwd = -interp.derivative(t).unwrap() / interp.interpolate(t).unwrap();
            assert_relative_eq!(fwd, 0.03, epsilon = 1e-12);
        }
        let fwd = -interp.derivative(1.5).unwrap() / interp.interpolate(1.5).unwrap();
        assert_relative_eq!(fwd, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, 0.0]).is_err());
        assert!(LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, -0.5]).is_err());
    }

    #[test]
    fn test_extrapolation_keeps_last_forward() {
        let interp = LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, (-0.02f64).exp()])
            .unwrap()
            .with_extrapolation();
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), (-0.04f64).exp(), epsilon = 1e-14);
        assert_eq!(interp.y_values().len(), 2);
    }
}
