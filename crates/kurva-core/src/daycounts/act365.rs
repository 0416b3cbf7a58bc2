//! Actual/365 Fixed.

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed day count.
///
/// The denominator is 365 regardless of leap years. Used as the time axis
/// for continuously compounded zero rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn denominator(&self) -> f64 {
        365.0
    }
}
