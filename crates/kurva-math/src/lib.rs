//! # Kurva Math
//!
//! Numerical building blocks for curve bootstrapping.
//!
//! - **Solvers**: Brent, Newton-Raphson and a Newton/Brent hybrid for
//!   one-dimensional root finding
//! - **Interpolation**: linear and log-linear interpolators
//! - **Optimization**: weighted Levenberg-Marquardt / Gauss-Newton least squares
//!
//! ## Example
//!
//! ```rust
//! use kurva_math::solvers::{brent, SolverConfig};
//!
//! // Continuously compounded rate that gives a discount factor of 0.98 at 1.5y
//! let f = |r: f64| (-r * 1.5).exp() - 0.98;
//! let result = brent(f, -0.10, 0.30, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.013468).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod interpolation;
pub mod optimization;
pub mod solvers;

pub use error::{MathError, MathResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator, LogLinearInterpolator};
    pub use crate::optimization::{LeastSquaresConfig, LeastSquaresResult, LevenbergMarquardt};
    pub use crate::solvers::{brent, hybrid, newton_raphson, SolverConfig, SolverResult};
}
