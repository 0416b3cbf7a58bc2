//! # Kurva Core
//!
//! Date handling building blocks for the Kurva curve bootstrapping library.
//!
//! This crate provides:
//!
//! - **Types**: [`Date`], [`Tenor`] and [`Frequency`]
//! - **Business Day Calendars**: holiday calendars (TARGET, Stockholm) and
//!   business day adjustment conventions
//! - **Day Count Conventions**: year fractions under ACT/360, ACT/365F and 30/360
//! - **Schedules**: adjusted accrual date generation for swap legs
//!
//! ## Example
//!
//! ```rust
//! use kurva_core::prelude::*;
//!
//! let calendar = CalendarId::Stockholm.calendar();
//! let spot = calendar.add_business_days(Date::from_ymd(2023, 1, 11).unwrap(), 2);
//! let maturity = calendar
//!     .advance(spot, "6M".parse().unwrap(), BusinessDayConvention::ModifiedFollowing)
//!     .unwrap();
//!
//! let tau = DayCountConvention::Act360.year_fraction(spot, maturity).unwrap();
//! assert!(tau > 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::return_self_not_must_use)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, CalendarId};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::Schedule;
    pub use crate::types::{Date, Frequency, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Frequency, Tenor, TenorUnit};
