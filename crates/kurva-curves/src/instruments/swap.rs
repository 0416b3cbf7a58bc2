//! Fixed-vs-floating interest rate swap.

use kurva_core::calendars::{BusinessDayConvention, CalendarId};
use kurva_core::daycounts::DayCountConvention;
use kurva_core::schedule::Schedule;
use kurva_core::{Date, Frequency, Tenor};

use super::RateInstrument;
use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::quote::Quote;

/// Leg conventions of a vanilla swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapConventions {
    /// Calendar shared by both legs.
    pub calendar: CalendarId,
    /// Business day convention shared by both legs.
    pub convention: BusinessDayConvention,
    /// Fixed leg payment frequency.
    pub fixed_frequency: Frequency,
    /// Fixed leg accrual basis.
    pub fixed_day_count: DayCountConvention,
    /// Floating index tenor, which is also the floating period length.
    pub float_tenor: Tenor,
    /// Floating leg accrual basis.
    pub float_day_count: DayCountConvention,
    /// Business days from valuation to the effective date.
    pub spot_lag_days: u32,
}

impl Default for SwapConventions {
    /// SEK vs 6M STIBOR: annual 30/360 fixed, semi-annual ACT/360 floating,
    /// Stockholm calendar, Modified Following, T+2.
    fn default() -> Self {
        Self {
            calendar: CalendarId::Stockholm,
            convention: BusinessDayConvention::ModifiedFollowing,
            fixed_frequency: Frequency::Annual,
            fixed_day_count: DayCountConvention::Thirty360US,
            float_tenor: Tenor::months(6),
            float_day_count: DayCountConvention::Act360,
            spot_lag_days: 2,
        }
    }
}

impl SwapConventions {
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

    /// Sets the fixed leg frequency and day count.
    #[must_use]
    pub fn with_fixed_leg(mut self, frequency: Frequency, day_count: DayCountConvention) -> Self {
        self.fixed_frequency = frequency;
        self.fixed_day_count = day_count;
        self
    }

    /// Sets the floating leg index tenor and day count.
    #[must_use]
    pub fn with_float_leg(mut self, tenor: Tenor, day_count: DayCountConvention) -> Self {
        self.float_tenor = tenor;
        self.float_day_count = day_count;
        self
    }

    /// Sets the spot lag.
    #[must_use]
    pub fn with_spot_lag(mut self, days: u32) -> Self {
        self.spot_lag_days = days;
        self
    }
}

/// A spot-starting vanilla swap quoted at its par fixed rate.
///
/// Single-curve par rate:
///
/// ```text
/// S = (DF(start) - DF(end)) / Σᵢ τᵢ DF(dᵢ)
/// ```
///
/// With a separate forecast curve the floating leg is
/// `Σⱼ Fⱼ τⱼ DF_disc(pⱼ)` with `Fⱼ` the forecast forward over period `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Swap {
    tenor: Tenor,
    quote: Quote,
    conventions: SwapConventions,
    fixed_schedule: Schedule,
    fixed_accruals: Vec<f64>,
    float_schedule: Schedule,
    float_accruals: Vec<f64>,
}

impl Swap {
    /// Creates a swap effective `spot_lag_days` business days after
    /// `valuation_date` with the given tenor.
    pub fn new(
        valuation_date: Date,
        tenor: Tenor,
        quote: Quote,
        conventions: SwapConventions,
    ) -> CurveResult<Self> {
        let calendar = conventions.calendar.calendar();
        let lag = i32::try_from(conventions.spot_lag_days)
            .map_err(|_| CurveError::invalid_instrument("spot lag too large"))?;
        let start = calendar.add_business_days(valuation_date, lag);
        let termination = tenor.add_to(start)?;

        let fixed_schedule = Schedule::generate(
            start,
            termination,
            conventions.fixed_frequency.tenor(),
            calendar,
            conventions.convention,
        )?;
        let float_schedule = Schedule::generate(
            start,
            termination,
            conventions.float_tenor,
            calendar,
            conventions.convention,
        )?;

        let fixed_accruals = fixed_schedule.accrual_fractions(conventions.fixed_day_count)?;
        let float_accruals = float_schedule.accrual_fractions(conventions.float_day_count)?;

        Ok(Self {
            tenor,
            quote,
            conventions,
            fixed_schedule,
            fixed_accruals,
            float_schedule,
            float_accruals,
        })
    }

    /// Returns the tenor.
    #[must_use]
    pub fn tenor(&self) -> Tenor {
        self.tenor
    }

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &SwapConventions {
        &self.conventions
    }

    /// Effective date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.fixed_schedule.start_date()
    }

    /// Fixed leg schedule.
    #[must_use]
    pub fn fixed_schedule(&self) -> &Schedule {
        &self.fixed_schedule
    }

    /// Floating leg schedule.
    #[must_use]
    pub fn float_schedule(&self) -> &Schedule {
        &self.float_schedule
    }

    /// Fixed leg annuity `Σ τᵢ DF(dᵢ)`.
    pub fn annuity(&self, discount: &DiscountCurve) -> CurveResult<f64> {
        self.fixed_schedule
            .adjusted_dates()
            .iter()
            .skip(1)
            .zip(&self.fixed_accruals)
            .try_fold(0.0, |acc, (&date, tau)| Ok(acc + tau * discount.discount_factor(date)?))
    }

    /// Floating leg value per unit notional, forwards projected on `forecast`
    /// and discounted on `discount`.
    pub fn float_leg_value(&self, discount: &DiscountCurve, forecast: &DiscountCurve) -> CurveResult<f64> {
        self.float_schedule
            .periods()
            .zip(&self.float_accruals)
            .try_fold(0.0, |acc, ((start, end), tau)| {
                let forward = forecast.forward_rate(start, end, self.conventions.float_day_count)?;
                Ok(acc + forward * tau * discount.discount_factor(end)?)
            })
    }

    /// Par rate with forwarding and discounting on one curve.
    pub fn par_rate(&self, curve: &DiscountCurve) -> CurveResult<f64> {
        let df_start = curve.discount_factor(self.start_date())?;
        let df_end = curve.discount_factor(self.maturity())?;
        Ok((df_start - df_end) / self.annuity(curve)?)
    }

    /// Par rate with a distinct forecast curve for the floating index.
    pub fn par_rate_dual(&self, discount: &DiscountCurve, forecast: &DiscountCurve) -> CurveResult<f64> {
        Ok(self.float_leg_value(discount, forecast)? / self.annuity(discount)?)
    }
}

impl RateInstrument for Swap {
    fn implied_rate(&self, curve: &DiscountCurve) -> CurveResult<f64> {
        self.par_rate(curve)
    }

    fn reference_dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self
            .fixed_schedule
            .adjusted_dates()
            .iter()
            .chain(self.float_schedule.adjusted_dates())
            .copied()
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    fn maturity(&self) -> Date {
        self.fixed_schedule.end_date()
    }

    fn quote(&self) -> &Quote {
        &self.quote
    }

    fn description(&self) -> String {
        format!("Swap {} {}", self.tenor, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveTemplate;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn swap_2y() -> Swap {
        Swap::new(
            d(2023, 1, 11),
            Tenor::years(2),
            Quote::percent(dec!(3.307)).unwrap(),
            SwapConventions::default(),
        )
        .unwrap()
    }

    fn flat_curve(rate: f64) -> DiscountCurve {
        let template = CurveTemplate::new(d(2023, 1, 11));
        DiscountCurve::from_zero_rates(template, &[(d(2026, 1, 11), rate)]).unwrap()
    }

    #[test]
    fn test_sek_schedules() {
        let swap = swap_2y();
        assert_eq!(swap.start_date(), d(2023, 1, 13));
        assert_eq!(swap.maturity(), d(2025, 1, 13));
        assert_eq!(
            swap.fixed_schedule().adjusted_dates(),
            &[d(2023, 1, 13), d(2024, 1, 15), d(2025, 1, 13)]
        );
        assert_eq!(swap.float_schedule().len(), 4);
        assert_eq!(swap.reference_dates().len(), 5);
        assert_eq!(swap.description(), "Swap 2Y 3.307%");
    }

    #[test]
    fn test_par_rate_formula() {
        let swap = swap_2y();
        let curve = flat_curve(0.03);

        let df = |date| curve.discount_factor(date).unwrap();
        let annuity = 362.0 / 360.0 * df(d(2024, 1, 15)) + 358.0 / 360.0 * df(d(2025, 1, 13));
        let expected = (df(d(2023, 1, 13)) - df(d(2025, 1, 13))) / annuity;

        assert_relative_eq!(swap.annuity(&curve).unwrap(), annuity, epsilon = 1e-15);
        assert_relative_eq!(swap.par_rate(&curve).unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_single_curve_float_leg_telescopes() {
        let swap = swap_2y();
        let curve = flat_curve(0.03);

        let float_leg = swap.float_leg_value(&curve, &curve).unwrap();
        let expected = curve.discount_factor(swap.start_date()).unwrap()
            - curve.discount_factor(swap.maturity()).unwrap();
        assert_relative_eq!(float_leg, expected, epsilon = 1e-15);
        assert_relative_eq!(
            swap.par_rate_dual(&curve, &curve).unwrap(),
            swap.par_rate(&curve).unwrap(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_dual_curve_par_rate_follows_forecast() {
        let swap = swap_2y();
        let discount = flat_curve(0.025);
        let forecast = flat_curve(0.03);

        let single = swap.par_rate(&discount).unwrap();
        let dual = swap.par_rate_dual(&discount, &forecast).unwrap();
        assert!(dual > single);
    }

    #[test]
    fn test_curve_too_short_is_reported() {
        let swap = swap_2y();
        let template = CurveTemplate::new(d(2023, 1, 11));
        let short = DiscountCurve::from_zero_rates(template, &[(d(2024, 1, 11), 0.03)]).unwrap();
        assert!(matches!(
            swap.par_rate(&short),
            Err(CurveError::DateOutOfRange { .. })
        ));
    }
}
