//! Error types for curve construction and querying.

use kurva_core::{CoreError, Date};
use kurva_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// End date precedes start date.
    #[error("Invalid date order: {end} is before {start}")]
    InvalidDateOrder {
        /// Start of the period.
        start: Date,
        /// End of the period.
        end: Date,
    },

    /// Instrument pillar does not lie beyond every calibrated node.
    #[error("Out of order instrument '{instrument}': pillar {pillar} is not after {last_node}")]
    OutOfOrderInstrument {
        /// Instrument description.
        instrument: String,
        /// The instrument's pillar date.
        pillar: Date,
        /// The last calibrated node date.
        last_node: Date,
    },

    /// Query date outside the curve and extrapolation is disabled.
    #[error("Date {date} out of range [{min}, {max}]")]
    DateOutOfRange {
        /// The requested date.
        date: Date,
        /// Valuation date of the curve.
        min: Date,
        /// Last node date of the curve.
        max: Date,
    },

    /// A solver did not reach its tolerance.
    #[error("Convergence failure after {iterations} iterations (residual: {residual:.2e}): {message}")]
    ConvergenceFailure {
        /// Iterations attempted.
        iterations: u32,
        /// Final residual.
        residual: f64,
        /// What was being solved.
        message: String,
    },

    /// Unknown or inconsistent calendar, business day convention or day count.
    #[error("Invalid calendar or convention: {reason}")]
    InvalidCalendarOrConvention {
        /// Description of the problem.
        reason: String,
    },

    /// Instrument could not be constructed.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of the problem.
        reason: String,
    },

    /// Curve data is malformed.
    #[error("Invalid data: {reason}")]
    InvalidData {
        /// Description of the problem.
        reason: String,
    },

    /// Curve configuration could not be read.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },
}

impl CurveError {
    /// Creates an out-of-order instrument error.
    #[must_use]
    pub fn out_of_order(instrument: impl Into<String>, pillar: Date, last_node: Date) -> Self {
        Self::OutOfOrderInstrument {
            instrument: instrument.into(),
            pillar,
            last_node,
        }
    }

    /// Creates a date out of range error.
    #[must_use]
    pub fn date_out_of_range(date: Date, min: Date, max: Date) -> Self {
        Self::DateOutOfRange { date, min, max }
    }

    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failure(iterations: u32, residual: f64, message: impl Into<String>) -> Self {
        Self::ConvergenceFailure {
            iterations,
            residual,
            message: message.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for CurveError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidDateOrder { start, end } => Self::InvalidDateOrder { start, end },
            CoreError::InvalidCalendarOrConvention { reason } => {
                Self::InvalidCalendarOrConvention { reason }
            }
            CoreError::InvalidTenor { .. } | CoreError::ScheduleError { .. } => {
                Self::invalid_instrument(err.to_string())
            }
            CoreError::InvalidDate { .. } => Self::invalid_data(err.to_string()),
        }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => Self::convergence_failure(iterations, residual, "iteration limit reached"),
            MathError::InvalidBracket { a, b, fa, fb } => Self::convergence_failure(
                0,
                fa.abs().min(fb.abs()),
                format!("no root bracketed in [{a}, {b}]"),
            ),
            other => Self::invalid_data(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_their_kind() {
        let start = Date::from_ymd(2023, 7, 13).unwrap();
        let end = Date::from_ymd(2023, 1, 13).unwrap();

        let err: CurveError = CoreError::invalid_date_order(start, end).into();
        assert_eq!(err, CurveError::InvalidDateOrder { start, end });

        let err: CurveError = CoreError::invalid_convention("unknown calendar id: 'XYZ'").into();
        assert!(matches!(err, CurveError::InvalidCalendarOrConvention { .. }));
    }

    #[test]
    fn test_math_errors_become_convergence_failures() {
        let err: CurveError = MathError::convergence_failed(100, 1e-7).into();
        assert!(matches!(
            err,
            CurveError::ConvergenceFailure { iterations: 100, .. }
        ));
        assert!(err.to_string().contains("100 iterations"));
    }

    #[test]
    fn test_error_display() {
        let pillar = Date::from_ymd(2024, 1, 15).unwrap();
        let last = Date::from_ymd(2025, 1, 15).unwrap();
        let err = CurveError::out_of_order("Swap 1Y", pillar, last);
        assert_eq!(
            err.to_string(),
            "Out of order instrument 'Swap 1Y': pillar 2024-01-15 is not after 2025-01-15"
        );
    }
}
