//! Stockholm (SEK) banking calendar.

use std::sync::OnceLock;

use chrono::{NaiveDate, Weekday};

use super::bitmap::{weekday_on_or_after, HolidayBitmap, HolidayCalendarBuilder};
use super::Calendar;
use crate::types::Date;

static STOCKHOLM_CALENDAR: OnceLock<StockholmCalendar> = OnceLock::new();

/// Swedish National Day became a public holiday in 2005.
const NATIONAL_DAY_FROM: i32 = 2005;

/// Stockholm holiday calendar used for SEK fixings and swap settlement.
///
/// ## Holidays
///
/// - New Year's Day and Epiphany (January 1 and 6)
/// - Good Friday, Easter Monday, Ascension Day
/// - May Day (May 1)
/// - National Day (June 6, from 2005)
/// - Midsummer Eve (Friday between June 19 and 25)
/// - Christmas Eve, Christmas Day, Boxing Day, New Year's Eve
#[derive(Debug, Clone)]
pub struct StockholmCalendar {
    bitmap: HolidayBitmap,
}

impl StockholmCalendar {
    /// Builds a new Stockholm calendar.
    #[must_use]
    pub fn new() -> Self {
        let bitmap = HolidayCalendarBuilder::new("STOCKHOLM")
            .add_fixed_holiday(1, 1)
            .add_fixed_holiday(1, 6)
            .add_easter_holiday(-2)
            .add_easter_holiday(1)
            .add_easter_holiday(39)
            .add_fixed_holiday(5, 1)
            .add_fixed_holiday_from(6, 6, NATIONAL_DAY_FROM)
            .add_custom_holidays(midsummer_eve)
            .add_fixed_holiday(12, 24)
            .add_fixed_holiday(12, 25)
            .add_fixed_holiday(12, 26)
            .add_fixed_holiday(12, 31)
            .build();
        Self { bitmap }
    }

    /// Shared instance, built on first use.
    pub fn global() -> &'static StockholmCalendar {
        STOCKHOLM_CALENDAR.get_or_init(StockholmCalendar::new)
    }
}

impl Default for StockholmCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for StockholmCalendar {
    fn name(&self) -> &'static str {
        self.bitmap.name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}

fn midsummer_eve(year: i32) -> Option<NaiveDate> {
    weekday_on_or_after(year, 6, 19, Weekday::Fri)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_holidays_2023() {
        let cal = StockholmCalendar::global();
        let holidays = [
            d(2023, 1, 6),   // Epiphany (Friday)
            d(2023, 4, 7),   // Good Friday
            d(2023, 4, 10),  // Easter Monday
            d(2023, 5, 1),   // May Day
            d(2023, 5, 18),  // Ascension
            d(2023, 6, 6),   // National Day
            d(2023, 6, 23),  // Midsummer Eve
            d(2023, 12, 25), // Christmas Day
            d(2023, 12, 26), // Boxing Day
        ];
        for date in holidays {
            assert!(!cal.is_business_day(date), "{date} should be a holiday");
        }
    }

    #[test]
    fn test_spot_dates_around_valuation() {
        let cal = StockholmCalendar::global();
        assert!(cal.is_business_day(d(2023, 1, 11)));
        assert!(cal.is_business_day(d(2023, 1, 13)));
        assert!(cal.is_business_day(d(2023, 7, 13)));
    }

    #[test]
    fn test_national_day_before_2005() {
        let cal = StockholmCalendar::global();
        // 2003-06-06 was a Friday and a working day
        assert!(cal.is_business_day(d(2003, 6, 6)));
    }

    #[test]
    fn test_new_years_eve() {
        let cal = StockholmCalendar::global();
        // 2024-12-31 is a Tuesday
        assert!(!cal.is_business_day(d(2024, 12, 31)));
        assert!(cal.is_business_day(d(2024, 12, 30)));
    }
}
