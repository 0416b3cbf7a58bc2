//! Bitmap-backed holiday storage.
//!
//! Holidays for every supported year are generated once from rules and stored
//! one bit per day, so lookups during schedule generation are constant time.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Minimum year supported by rule-based calendars.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by rule-based calendars.
pub const MAX_YEAR: i32 = 2100;

const DAYS_PER_YEAR_SLOT: usize = 366;
const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;
const WORD_COUNT: usize = (YEAR_COUNT * DAYS_PER_YEAR_SLOT).div_ceil(64);

/// Holiday set stored as a bitmap, with Saturday/Sunday weekends.
///
/// Dates outside `MIN_YEAR..=MAX_YEAR` are never holidays (weekends still apply).
#[derive(Clone)]
pub struct HolidayBitmap {
    name: &'static str,
    bits: Box<[u64]>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("name", &self.name)
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// Creates an empty bitmap.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bits: vec![0u64; WORD_COUNT].into_boxed_slice(),
        }
    }

    /// Returns the calendar name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Marks a date as a holiday. Out-of-range dates are ignored.
    pub fn insert(&mut self, date: NaiveDate) {
        if let Some((word, bit)) = slot(date) {
            self.bits[word] |= 1u64 << bit;
        }
    }

    /// Returns true if the date was registered as a holiday.
    #[inline]
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        slot(date).is_some_and(|(word, bit)| self.bits[word] & (1u64 << bit) != 0)
    }

    /// Returns true if the date is neither a weekend nor a holiday.
    #[inline]
    #[must_use]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    /// Number of registered holidays.
    #[must_use]
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }
}

#[inline]
fn slot(date: NaiveDate) -> Option<(usize, usize)> {
    let year = date.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    let position = (year - MIN_YEAR) as usize * DAYS_PER_YEAR_SLOT + date.ordinal0() as usize;
    Some((position / 64, position % 64))
}

/// Rule-based builder for [`HolidayBitmap`].
///
/// ```rust
/// use kurva_core::calendars::HolidayCalendarBuilder;
/// use chrono::NaiveDate;
///
/// let bitmap = HolidayCalendarBuilder::new("TEST")
///     .year_range(2023, 2023)
///     .add_fixed_holiday(1, 1)
///     .add_easter_holiday(-2)
///     .build();
///
/// assert!(bitmap.is_holiday(NaiveDate::from_ymd_opt(2023, 4, 7).unwrap()));
/// ```
pub struct HolidayCalendarBuilder {
    name: &'static str,
    holidays: BTreeSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl HolidayCalendarBuilder {
    /// Creates a builder covering the full supported year range.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            holidays: BTreeSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Restricts the years for which rules are expanded.
    #[must_use]
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Adds a holiday on the same month/day every year. Weekend occurrences
    /// are not moved.
    #[must_use]
    pub fn add_fixed_holiday(self, month: u32, day: u32) -> Self {
        let from = self.start_year;
        self.add_fixed_holiday_from(month, day, from)
    }

    /// Adds a fixed holiday observed from `from_year` onwards.
    #[must_use]
    pub fn add_fixed_holiday_from(mut self, month: u32, day: u32, from_year: i32) -> Self {
        for year in from_year.max(self.start_year)..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Adds a holiday at a fixed offset from Easter Sunday.
    #[must_use]
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = easter_sunday(year)
                .and_then(|e| e.checked_add_signed(chrono::Duration::days(offset_days)))
            {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Adds holidays produced by a per-year rule.
    #[must_use]
    pub fn add_custom_holidays<F>(mut self, rule: F) -> Self
    where
        F: Fn(i32) -> Option<NaiveDate>,
    {
        for year in self.start_year..=self.end_year {
            if let Some(date) = rule(year) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Builds the bitmap.
    #[must_use]
    pub fn build(self) -> HolidayBitmap {
        let mut bitmap = HolidayBitmap::new(self.name);
        for date in self.holidays {
            bitmap.insert(date);
        }
        bitmap
    }
}

/// First occurrence of `weekday` on or after `year-month-day`.
#[must_use]
pub fn weekday_on_or_after(year: i32, month: u32, day: u32, weekday: Weekday) -> Option<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, month, day)?;
    let ahead = (i64::from(weekday.num_days_from_monday())
        - i64::from(start.weekday().num_days_from_monday()))
    .rem_euclid(7);
    start.checked_add_signed(chrono::Duration::days(ahead))
}

/// Easter Sunday (anonymous Gregorian algorithm).
#[allow(clippy::many_single_char_names)]
#[must_use]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
