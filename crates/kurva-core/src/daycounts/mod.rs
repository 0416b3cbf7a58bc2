//! Day count conventions.
//!
//! - [`Act360`]: Actual/360, money market basis
//! - [`Act365Fixed`]: Actual/365 Fixed, the curve time axis
//! - [`Thirty360US`]: 30/360 bond basis with February end-of-month rules
//! - [`Thirty360E`]: 30E/360 Eurobond basis
//!
//! # Usage
//!
//! ```rust
//! use kurva_core::daycounts::{DayCount, Thirty360US};
//! use kurva_core::types::Date;
//!
//! let start = Date::from_ymd(2023, 1, 13).unwrap();
//! let end = Date::from_ymd(2024, 1, 15).unwrap();
//!
//! assert_eq!(Thirty360US.day_count(start, end), 362);
//! assert!(Thirty360US.year_fraction(end, start).is_err());
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::{Thirty360E, Thirty360US};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// A day count convention.
pub trait DayCount: Send + Sync {
    /// Market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Number of days between the dates under this convention.
    ///
    /// Negative when `end` is before `start`.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year basis the day count is divided by.
    fn denominator(&self) -> f64;

    /// Year fraction, negative when `end` is before `start`.
    fn signed_year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / self.denominator()
    }

    /// Year fraction between two ordered dates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDateOrder` if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> CoreResult<f64> {
        if end < start {
            return Err(CoreError::invalid_date_order(start, end));
        }
        Ok(self.signed_year_fraction(start, end))
    }
}

/// Runtime-selectable day count convention.
///
/// Serializes as its market name so curve files can say `"ACT/360"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/360
    Act360,
    /// Actual/365 Fixed
    #[default]
    Act365Fixed,
    /// 30/360 US (bond basis)
    Thirty360US,
    /// 30E/360 (Eurobond basis)
    Thirty360E,
}

impl DayCountConvention {
    /// Returns the shared implementation.
    #[must_use]
    pub fn to_day_count(&self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
            DayCountConvention::Thirty360US => &Thirty360US,
            DayCountConvention::Thirty360E => &Thirty360E,
        }
    }

    /// Market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.to_day_count().name()
    }

    /// All supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
        ]
    }

    /// Day count between two dates.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        self.to_day_count().day_count(start, end)
    }

    /// Year fraction between two ordered dates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDateOrder` if `end` is before `start`.
    pub fn year_fraction(&self, start: Date, end: Date) -> CoreResult<f64> {
        self.to_day_count().year_fraction(start, end)
    }

    /// Year fraction that may be negative.
    #[must_use]
    pub fn signed_year_fraction(&self, start: Date, end: Date) -> f64 {
        self.to_day_count().signed_year_fraction(start, end)
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    /// Accepts market names ("ACT/360", "30/360"), enum-style names
    /// ("Act360") and common aliases ("BOND", "EUROBOND").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" | "A360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACTUAL/365 FIXED"
            | "ACT365FIXED" | "ACT365" | "A365F" => Ok(DayCountConvention::Act365Fixed),

            "30/360" | "30/360 US" | "30U/360" | "BOND" | "THIRTY360US" | "30/360US" => {
                Ok(DayCountConvention::Thirty360US)
            }

            "30E/360" | "30/360 ICMA" | "EUROBOND" | "THIRTY360E" | "30E360" => {
                Ok(DayCountConvention::Thirty360E)
            }

            _ => Err(CoreError::invalid_convention(format!(
                "unknown day count convention: '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(convention: DayCountConvention) -> Self {
        convention.name().to_string()
    }
}
