//! Accrual schedule generation for swap legs.
//!
//! Dates are generated forward from the effective date as
//! `effective + k × tenor` (never by repeatedly adding to the previous date,
//! so month-end clamping does not drift), then adjusted on the calendar.
//! A period that does not divide evenly leaves a short final stub.

use crate::calendars::{BusinessDayConvention, Calendar};
use crate::daycounts::DayCountConvention;
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Tenor};

/// A generated schedule of accrual dates.
///
/// `adjusted_dates()[0]` is the accrual start; each following date closes
/// one period and is also its payment date.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    unadjusted_dates: Vec<Date>,
    adjusted_dates: Vec<Date>,
}

impl Schedule {
    /// Generates a schedule between `effective` and `termination`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ScheduleError` if `termination` is not after
    /// `effective` or the tenor is not positive.
    pub fn generate(
        effective: Date,
        termination: Date,
        tenor: Tenor,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
    ) -> CoreResult<Self> {
        if termination <= effective {
            return Err(CoreError::schedule(format!(
                "termination {termination} must be after effective date {effective}"
            )));
        }
        if tenor.length() <= 0 {
            return Err(CoreError::schedule(format!("non-positive tenor {tenor}")));
        }

        let mut unadjusted = vec![effective];
        let mut k = 1;
        loop {
            let next = tenor.times(k).add_to(effective)?;
            if next >= termination {
                break;
            }
            unadjusted.push(next);
            k += 1;
        }
        unadjusted.push(termination);

        let adjusted: Vec<Date> = unadjusted
            .iter()
            .map(|&date| calendar.adjust(date, convention))
            .collect();

        if adjusted.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CoreError::schedule(format!(
                "adjusted dates collapse between {effective} and {termination} at tenor {tenor}"
            )));
        }

        log::trace!(
            "generated {} periods from {effective} to {termination} ({tenor})",
            adjusted.len() - 1
        );

        Ok(Self {
            unadjusted_dates: unadjusted,
            adjusted_dates: adjusted,
        })
    }

    /// Unadjusted schedule dates.
    #[must_use]
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted_dates
    }

    /// Adjusted schedule dates.
    #[must_use]
    pub fn adjusted_dates(&self) -> &[Date] {
        &self.adjusted_dates
    }

    /// Adjusted accrual start.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.adjusted_dates[0]
    }

    /// Adjusted final payment date.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.adjusted_dates[self.adjusted_dates.len() - 1]
    }

    /// Number of accrual periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjusted_dates.len() - 1
    }

    /// Always false: a generated schedule has at least one period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over adjusted `(accrual_start, accrual_end)` pairs.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.adjusted_dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Accrual fraction of every period under `day_count`.
    pub fn accrual_fractions(&self, day_count: DayCountConvention) -> CoreResult<Vec<f64>> {
        self.periods()
            .map(|(start, end)| day_count.year_fraction(start, end))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{StockholmCalendar, WeekendCalendar};
    use crate::types::Frequency;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_annual_schedule() {
        let spot = d(2023, 1, 13);
        let schedule = Schedule::generate(
            spot,
            spot.add_years(3).unwrap(),
            Frequency::Annual.tenor(),
            StockholmCalendar::global(),
            BusinessDayConvention::ModifiedFollowing,
        )
        .unwrap();

        assert_eq!(schedule.len(), 3);
        assert_eq!(
            schedule.adjusted_dates(),
            &[d(2023, 1, 13), d(2024, 1, 15), d(2025, 1, 13), d(2026, 1, 13)]
        );
        assert_eq!(schedule.unadjusted_dates()[1], d(2024, 1, 13));
    }

    #[test]
    fn test_no_month_end_drift() {
        let start = d(2023, 8, 31);
        let schedule = Schedule::generate(
            start,
            start.add_months(12).unwrap(),
            Tenor::months(3),
            &WeekendCalendar,
            BusinessDayConvention::Unadjusted,
        )
        .unwrap();

        // Nov 30 must not drag the later dates to the 30th
        assert_eq!(
            schedule.unadjusted_dates(),
            &[d(2023, 8, 31), d(2023, 11, 30), d(2024, 2, 29), d(2024, 5, 31), d(2024, 8, 31)]
        );
    }

    #[test]
    fn test_short_final_stub() {
        let schedule = Schedule::generate(
            d(2023, 1, 16),
            d(2024, 4, 16),
            Tenor::months(6),
            &WeekendCalendar,
            BusinessDayConvention::Following,
        )
        .unwrap();

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.end_date(), d(2024, 4, 16));
    }

    #[test]
    fn test_accrual_fractions() {
        let schedule = Schedule::generate(
            d(2023, 1, 13),
            d(2024, 1, 13),
            Tenor::months(6),
            StockholmCalendar::global(),
            BusinessDayConvention::ModifiedFollowing,
        )
        .unwrap();

        let taus = schedule.accrual_fractions(DayCountConvention::Act360).unwrap();
        assert_eq!(taus.len(), 2);
        // 2023-01-13 -> 2023-07-13 -> 2024-01-15
        assert_relative_eq!(taus[0], 181.0 / 360.0);
        assert_relative_eq!(taus[1], 186.0 / 360.0);
    }

    #[test]
    fn test_invalid_range() {
        let err = Schedule::generate(
            d(2023, 1, 13),
            d(2023, 1, 13),
            Tenor::years(1),
            &WeekendCalendar,
            BusinessDayConvention::Following,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ScheduleError { .. }));
    }
}
