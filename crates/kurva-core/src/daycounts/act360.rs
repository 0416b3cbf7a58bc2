//! Actual/360.

use super::DayCount;
use crate::types::Date;

/// Actual/360 day count.
///
/// Money market basis: STIBOR and EURIBOR deposits, floating swap legs.
///
/// $$\tau = \frac{d_2 - d_1}{360}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn denominator(&self) -> f64 {
        360.0
    }
}
