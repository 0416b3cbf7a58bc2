//! Interpolation on sorted abscissae.
//!
//! - [`LinearInterpolator`]: linear in the values (linear zero rates)
//! - [`LogLinearInterpolator`]: linear in the logarithm of the values
//!   (log-linear discount factors, piecewise flat forwards)

mod linear;
mod log_linear;

pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Checks lengths and strict ordering shared by all interpolators.
fn validate(xs: &[f64], ys: &[f64]) -> MathResult<()> {
    if xs.len() < 2 {
        return Err(MathError::insufficient_data(2, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::dimension_mismatch(xs.len(), ys.len()));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input("x values must be strictly increasing"));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("x and y values must be finite"));
    }
    Ok(())
}

/// Index `i` of the segment `[xs[i], xs[i+1]]` used for `x`.
///
/// Points outside the data use the first or last segment.
fn find_segment(xs: &[f64], x: f64) -> usize {
    let upper = xs.partition_point(|&probe| probe <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}
