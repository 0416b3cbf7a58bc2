//! Errors of the root finders, interpolators and least-squares solver.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by solvers, interpolators and least-squares routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iteration limit reached without meeting the tolerance.
    #[error("no convergence after {iterations} iterations, residual {residual:.2e}")]
    ConvergenceFailed {
        /// Iterations spent.
        iterations: u32,
        /// Residual at the last iterate (absolute value or norm).
        residual: f64,
    },

    /// No sign change between the bracket ends.
    #[error("root not bracketed: f({a}) = {fa:.2e}, f({b}) = {fb:.2e}")]
    InvalidBracket {
        /// Left end.
        a: f64,
        /// Right end.
        b: f64,
        /// `f(a)`.
        fa: f64,
        /// `f(b)`.
        fb: f64,
    },

    /// A Newton step would divide by a vanishing derivative.
    #[error("derivative {value:.2e} too small to divide by")]
    DivisionByZero {
        /// The offending derivative.
        value: f64,
    },

    /// The normal equations have no unique solution.
    #[error("singular normal equations")]
    SingularMatrix,

    /// Vector or matrix sizes disagree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Interpolation queried outside its nodes.
    #[error("{x} lies outside the interpolation range [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// Query time.
        x: f64,
        /// First node.
        min: f64,
        /// Last node.
        max: f64,
    },

    /// Too few points or residuals for the problem size.
    #[error("need at least {required} points, got {actual}")]
    InsufficientData {
        /// Required count.
        required: usize,
        /// Supplied count.
        actual: usize,
    },

    /// Malformed input or a numerical breakdown.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What went wrong.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));

        let err = MathError::dimension_mismatch(3, 2);
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");
    }
}
