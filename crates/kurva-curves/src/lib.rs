//! # Kurva Curves
//!
//! Discount curve bootstrapping from deposits and swaps.
//!
//! This crate provides:
//!
//! - **Quotes**: market quotes in percent, one-way or bid/ask
//! - **Instruments**: [`Deposit`](instruments::Deposit) and [`Swap`](instruments::Swap)
//!   behind the [`RateInstrument`](instruments::RateInstrument) trait
//! - **Curve**: [`DiscountCurve`](curve::DiscountCurve) with log-linear discount or
//!   linear zero interpolation
//! - **Bootstrap**: sequential and global least-squares solvers behind
//!   [`CurveSolver`](bootstrap::CurveSolver), repricing reports and parallel builds
//! - **Reports**: zero rate tables and comparison against reference rates
//! - **Configuration**: TOML/JSON curve descriptions
//!
//! ## Quick Start
//!
//! ```rust
//! use kurva_core::daycounts::DayCountConvention;
//! use kurva_core::{Date, Tenor};
//! use kurva_curves::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let valuation = Date::from_ymd(2023, 1, 11).unwrap();
//! let result = CurveBuilder::new(valuation)
//!     .deposit(Tenor::months(6), Quote::percent(Decimal::new(3218, 3)).unwrap(), DepositConventions::default())
//!     .unwrap()
//!     .swap(Tenor::years(1), Quote::percent(Decimal::new(35227, 4)).unwrap(), SwapConventions::default())
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let six_months = Date::from_ymd(2023, 7, 13).unwrap();
//! let zero = result.curve.zero_rate(six_months, DayCountConvention::Act365Fixed).unwrap();
//! assert!((zero - 0.032366).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]

pub mod bootstrap;
pub mod builder;
pub mod config;
pub mod curve;
pub mod error;
pub mod instruments;
pub mod quote;
pub mod repricing;
pub mod report;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        BootstrapMethod, BootstrapResult, CurveSolver, GlobalSolver, RootSearch, SequentialSolver,
    };
    pub use crate::builder::{build_curves_parallel, CurveBuilder};
    pub use crate::config::{CurveConfig, InstrumentConfig, ReferenceTable};
    pub use crate::curve::{CurveTemplate, DiscountCurve, Interpolation};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        Deposit, DepositConventions, Instrument, InstrumentSet, RateInstrument, Swap,
        SwapConventions,
    };
    pub use crate::quote::Quote;
    pub use crate::report::{compare, zero_rate_table, ComparisonReport, ReferenceRow};
    pub use crate::repricing::RepricingReport;
}

pub use error::{CurveError, CurveResult};
