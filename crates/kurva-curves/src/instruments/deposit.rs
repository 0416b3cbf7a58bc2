//! Money market deposit.

use kurva_core::calendars::{BusinessDayConvention, CalendarId};
use kurva_core::daycounts::DayCountConvention;
use kurva_core::{Date, Tenor};

use super::RateInstrument;
use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::quote::Quote;

/// Date and accrual conventions of a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositConventions {
    /// Calendar for spot and maturity dates.
    pub calendar: CalendarId,
    /// Maturity adjustment.
    pub convention: BusinessDayConvention,
    /// Accrual basis of the quoted rate.
    pub day_count: DayCountConvention,
    /// Business days from valuation to start.
    pub fixing_lag_days: u32,
}

impl Default for DepositConventions {
    /// STIBOR deposit: Stockholm, Modified Following, ACT/360, T+2.
    fn default() -> Self {
        Self {
            calendar: CalendarId::Stockholm,
            convention: BusinessDayConvention::ModifiedFollowing,
            day_count: DayCountConvention::Act360,
            fixing_lag_days: 2,
        }
    }
}

impl DepositConventions {
    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the fixing lag.
    #[must_use]
    pub fn with_fixing_lag(mut self, days: u32) -> Self {
        self.fixing_lag_days = days;
        self
    }
}

/// A money market deposit quoted as a simple rate.
///
/// Calibrates when
///
/// ```text
/// (DF(start) / DF(maturity) - 1) / τ(start, maturity) = quote
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Deposit {
    tenor: Tenor,
    quote: Quote,
    conventions: DepositConventions,
    start_date: Date,
    maturity: Date,
    accrual: f64,
}

impl Deposit {
    /// Creates a deposit starting `fixing_lag_days` business days after
    /// `valuation_date` and maturing `tenor` later.
    pub fn new(
        valuation_date: Date,
        tenor: Tenor,
        quote: Quote,
        conventions: DepositConventions,
    ) -> CurveResult<Self> {
        let calendar = conventions.calendar.calendar();
        let lag = i32::try_from(conventions.fixing_lag_days)
            .map_err(|_| CurveError::invalid_instrument("fixing lag too large"))?;
        let start_date = calendar.add_business_days(valuation_date, lag);
        let maturity = calendar.advance(start_date, tenor, conventions.convention)?;

        if maturity <= start_date {
            return Err(CurveError::invalid_instrument(format!(
                "deposit {tenor} matures on {maturity}, not after start {start_date}"
            )));
        }
        let accrual = conventions.day_count.year_fraction(start_date, maturity)?;

        Ok(Self {
            tenor,
            quote,
            conventions,
            start_date,
            maturity,
            accrual,
        })
    }

    /// Returns the tenor.
    #[must_use]
    pub fn tenor(&self) -> Tenor {
        self.tenor
    }

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &DepositConventions {
        &self.conventions
    }

    /// Returns the start (spot) date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Accrual fraction from start to maturity.
    #[must_use]
    pub fn accrual(&self) -> f64 {
        self.accrual
    }
}

impl RateInstrument for Deposit {
    fn implied_rate(&self, curve: &DiscountCurve) -> CurveResult<f64> {
        let df_start = curve.discount_factor(self.start_date)?;
        let df_end = curve.discount_factor(self.maturity)?;
        Ok((df_start / df_end - 1.0) / self.accrual)
    }

    fn reference_dates(&self) -> Vec<Date> {
        vec![self.start_date, self.maturity]
    }

    fn maturity(&self) -> Date {
        self.maturity
    }

    fn quote(&self) -> &Quote {
        &self.quote
    }

    fn description(&self) -> String {
        format!("Deposit {} {}", self.tenor, self.quote)
    }
}
