//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait with adjustment and tenor arithmetic
//! - Rule-based market calendars (TARGET2, Stockholm) on a holiday bitmap
//! - [`CalendarId`], the string identifier used in curve configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod bitmap;
mod conventions;
mod stockholm;
mod target2;

pub use bitmap::{
    easter_sunday, weekday_on_or_after, HolidayBitmap, HolidayCalendarBuilder, MAX_YEAR, MIN_YEAR,
};
pub use conventions::{adjust, BusinessDayConvention};
pub use stockholm::StockholmCalendar;
pub use target2::Target2Calendar;

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Tenor, TenorUnit};

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend day or a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by `days` business days (backwards when negative).
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let step: i64 = if days >= 0 { 1 } else { -1 };
        let mut result = date;
        let mut remaining = days.unsigned_abs();

        while remaining > 0 {
            result = result.add_days(step);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Advances a date by a tenor and adjusts the result.
    ///
    /// Day tenors count business days; week, month and year tenors use
    /// calendar arithmetic followed by `convention`.
    fn advance(&self, date: Date, tenor: Tenor, convention: BusinessDayConvention) -> CoreResult<Date> {
        match tenor.unit() {
            TenorUnit::Days => Ok(self.add_business_days(date, tenor.length())),
            _ => Ok(self.adjust(tenor.add_to(date)?, convention)),
        }
    }

    /// Counts business days in `(start, end]`.
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// Calendar with Saturday/Sunday weekends and no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "WEEKENDS"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Union of several calendars: a day is a business day only if it is one in
/// every member.
pub struct JointCalendar {
    calendars: Vec<&'static dyn Calendar>,
    name: String,
}

impl JointCalendar {
    /// Creates a joint calendar from its members.
    #[must_use]
    pub fn new(calendars: Vec<&'static dyn Calendar>) -> Self {
        let name = calendars
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join("+");
        Self { calendars, name }
    }

    /// Creates a joint calendar from calendar identifiers.
    #[must_use]
    pub fn from_ids(ids: &[CalendarId]) -> Self {
        Self::new(ids.iter().map(|id| id.calendar()).collect())
    }
}

impl fmt::Debug for JointCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JointCalendar").field("name", &self.name).finish()
    }
}

impl Calendar for JointCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.calendars.iter().all(|cal| cal.is_business_day(date))
    }
}

static WEEKENDS: WeekendCalendar = WeekendCalendar;

/// Identifier of a built-in calendar, as written in input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarId {
    /// Weekends only, no holidays.
    Weekends,
    /// Eurozone TARGET2.
    Target,
    /// Stockholm (SEK).
    #[default]
    Stockholm,
}

impl CalendarId {
    /// Returns the shared calendar instance.
    #[must_use]
    pub fn calendar(self) -> &'static dyn Calendar {
        match self {
            CalendarId::Weekends => &WEEKENDS,
            CalendarId::Target => Target2Calendar::global(),
            CalendarId::Stockholm => StockholmCalendar::global(),
        }
    }

    /// Canonical identifier string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarId::Weekends => "WEEKENDS",
            CalendarId::Target => "TARGET",
            CalendarId::Stockholm => "STOCKHOLM",
        }
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WEEKENDS" | "WEEKEND" | "NONE" => Ok(CalendarId::Weekends),
            "TARGET" | "TARGET2" | "EUR" => Ok(CalendarId::Target),
            "STOCKHOLM" | "SEK" | "SE" => Ok(CalendarId::Stockholm),
            _ => Err(CoreError::invalid_convention(format!(
                "unknown calendar id: '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for CalendarId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarId> for String {
    fn from(id: CalendarId) -> Self {
        id.as_str().to_string()
    }
}
