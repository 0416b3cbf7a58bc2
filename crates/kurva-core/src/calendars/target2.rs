//! TARGET2 calendar for Eurozone settlement.

use std::sync::OnceLock;

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder};
use super::Calendar;
use crate::types::Date;

static TARGET2_CALENDAR: OnceLock<Target2Calendar> = OnceLock::new();

/// TARGET2 holiday calendar.
///
/// Closing days: New Year's Day, Good Friday, Easter Monday, Labour Day
/// (May 1), Christmas Day and December 26. Holidays falling on a weekend
/// are not moved.
#[derive(Debug, Clone)]
pub struct Target2Calendar {
    bitmap: HolidayBitmap,
}

impl Target2Calendar {
    /// Builds a new TARGET2 calendar.
    #[must_use]
    pub fn new() -> Self {
        let bitmap = HolidayCalendarBuilder::new("TARGET")
            .add_fixed_holiday(1, 1)
            .add_easter_holiday(-2)
            .add_easter_holiday(1)
            .add_fixed_holiday(5, 1)
            .add_fixed_holiday(12, 25)
            .add_fixed_holiday(12, 26)
            .build();
        Self { bitmap }
    }

    /// Shared instance, built on first use.
    pub fn global() -> &'static Target2Calendar {
        TARGET2_CALENDAR.get_or_init(Target2Calendar::new)
    }
}

impl Default for Target2Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for Target2Calendar {
    fn name(&self) -> &'static str {
        self.bitmap.name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_closing_days_2023() {
        let cal = Target2Calendar::global();
        for date in [d(2023, 4, 7), d(2023, 4, 10), d(2023, 5, 1), d(2023, 12, 25), d(2023, 12, 26)] {
            assert!(!cal.is_business_day(date), "{date} should be closed");
        }
    }

    #[test]
    fn test_no_weekend_observation() {
        let cal = Target2Calendar::global();
        // 2028-01-01 is a Saturday, Friday before stays open
        assert!(cal.is_business_day(d(2027, 12, 31)));
    }

    #[test]
    fn test_national_holidays_open() {
        let cal = Target2Calendar::global();
        // Epiphany and Ascension are not TARGET holidays
        assert!(cal.is_business_day(d(2023, 1, 6)));
        assert!(cal.is_business_day(d(2023, 5, 18)));
    }
}
