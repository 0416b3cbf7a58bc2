//! 30/360 day counts.

use super::DayCount;
use crate::types::Date;

#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

#[inline]
fn thirty_360_days(y1: i64, m1: i64, d1: i64, y2: i64, m2: i64, d2: i64) -> i64 {
    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

// =============================================================================
// 30/360 US (Bond Basis)
// =============================================================================

/// 30/360 US (bond basis).
///
/// Rules, applied in order:
/// 1. If D1 is the last day of February, D1 = 30
/// 2. Else if D1 is 31, D1 = 30
/// 3. If D1 was the last day of February and D2 is too, D2 = 30
/// 4. Else if D2 is 31 and D1 is now 30, D2 = 30
///
/// Used for SEK fixed swap legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());
        let start_feb_eom = is_last_day_of_february(start);

        if start_feb_eom || d1 == 31 {
            d1 = 30;
        }

        if start_feb_eom && is_last_day_of_february(end) {
            d2 = 30;
        } else if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        thirty_360_days(
            i64::from(start.year()),
            i64::from(start.month()),
            d1,
            i64::from(end.year()),
            i64::from(end.month()),
            d2,
        )
    }

    fn denominator(&self) -> f64 {
        360.0
    }
}

// =============================================================================
// 30E/360 (Eurobond Basis)
// =============================================================================

/// 30E/360 (Eurobond basis): any 31st becomes the 30th, no February rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));

        thirty_360_days(
            i64::from(start.year()),
            i64::from(start.month()),
            d1,
            i64::from(end.year()),
            i64::from(end.month()),
            d2,
        )
    }

    fn denominator(&self) -> f64 {
        360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_us_full_year() {
        assert_eq!(Thirty360US.day_count(d(2023, 1, 13), d(2024, 1, 13)), 360);
        assert_relative_eq!(
            Thirty360US.year_fraction(d(2023, 1, 13), d(2024, 1, 15)).unwrap(),
            362.0 / 360.0
        );
    }

    #[test]
    fn test_us_feb_eom_start() {
        // D1 = 30 (Feb EOM), D2 = 31 -> 30
        assert_eq!(Thirty360US.day_count(d(2025, 2, 28), d(2025, 3, 31)), 30);
        // Leap year February
        assert_eq!(Thirty360US.day_count(d(2024, 2, 29), d(2024, 3, 31)), 30);
    }

    #[test]
    fn test_us_feb_to_feb() {
        assert_eq!(Thirty360US.day_count(d(2024, 2, 29), d(2025, 2, 28)), 360);
    }

    #[test]
    fn test_us_d2_31_kept_when_d1_below_30() {
        assert_eq!(Thirty360US.day_count(d(2025, 1, 15), d(2025, 3, 31)), 76);
    }

    #[test]
    fn test_e_always_caps_31() {
        assert_eq!(Thirty360E.day_count(d(2025, 1, 15), d(2025, 3, 31)), 75);
        assert_eq!(Thirty360E.day_count(d(2025, 1, 31), d(2025, 3, 31)), 60);
    }

    #[test]
    fn test_e_no_february_rule() {
        // Feb 28 stays 28
        assert_eq!(Thirty360E.day_count(d(2025, 2, 28), d(2025, 3, 31)), 32);
    }
}
