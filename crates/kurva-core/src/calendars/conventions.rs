//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// How a date falling on a non-business day is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Keep the date even if it is not a business day.
    Unadjusted,

    /// Roll to the next business day.
    Following,

    /// Roll forward, unless that crosses into the next month, in which case
    /// roll backward.
    #[default]
    ModifiedFollowing,

    /// Roll to the previous business day.
    Preceding,

    /// Roll backward, unless that crosses into the previous month, in which
    /// case roll forward.
    ModifiedPreceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "UNADJUSTED" | "NONE" => Ok(BusinessDayConvention::Unadjusted),
            "FOLLOWING" | "F" => Ok(BusinessDayConvention::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(BusinessDayConvention::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(BusinessDayConvention::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(BusinessDayConvention::ModifiedPreceding),
            _ => Err(CoreError::invalid_convention(format!(
                "unknown business day convention: '{s}'"
            ))),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }
        BusinessDayConvention::Preceding => preceding(date, calendar),
        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)
            }
        }
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{StockholmCalendar, WeekendCalendar};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_following_and_preceding() {
        let cal = WeekendCalendar;
        let saturday = d(2023, 1, 14);
        assert_eq!(adjust(saturday, BusinessDayConvention::Following, &cal), d(2023, 1, 16));
        assert_eq!(adjust(saturday, BusinessDayConvention::Preceding, &cal), d(2023, 1, 13));
        assert_eq!(adjust(saturday, BusinessDayConvention::Unadjusted, &cal), saturday);
    }

    #[test]
    fn test_modified_following_month_end() {
        let cal = WeekendCalendar;
        // Saturday 2023-09-30: following would land in October
        let date = d(2023, 9, 30);
        assert_eq!(
            adjust(date, BusinessDayConvention::ModifiedFollowing, &cal),
            d(2023, 9, 29)
        );
    }

    #[test]
    fn test_modified_preceding_month_start() {
        let cal = WeekendCalendar;
        // Sunday 2023-10-01: preceding would land in September
        let date = d(2023, 10, 1);
        assert_eq!(
            adjust(date, BusinessDayConvention::ModifiedPreceding, &cal),
            d(2023, 10, 2)
        );
    }

    #[test]
    fn test_modified_following_over_holiday() {
        let cal = StockholmCalendar::global();
        // Midsummer Eve 2023 (Friday) rolls over the weekend to Monday
        assert_eq!(
            adjust(d(2023, 6, 23), BusinessDayConvention::ModifiedFollowing, cal),
            d(2023, 6, 26)
        );
    }

    #[test]
    fn test_business_day_unchanged() {
        let cal = WeekendCalendar;
        let monday = d(2023, 1, 16);
        assert_eq!(adjust(monday, BusinessDayConvention::Preceding, &cal), monday);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "ModifiedFollowing".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "modified following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!("MF".parse::<BusinessDayConvention>().unwrap(), BusinessDayConvention::ModifiedFollowing);
        assert!(matches!(
            "Nearest".parse::<BusinessDayConvention>(),
            Err(CoreError::InvalidCalendarOrConvention { .. })
        ));
    }
}
