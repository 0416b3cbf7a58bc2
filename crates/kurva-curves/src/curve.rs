//! Discount curve representation.
//!
//! A [`DiscountCurve`] is a set of `(date, discount factor)` nodes anchored at
//! the valuation date with `df = 1`. Times are measured from the valuation
//! date under the curve's day count (ACT/365F unless configured otherwise).
//!
//! Between nodes the curve interpolates per [`Interpolation`]. Outside the
//! node range it extends the nearest segment's forward rate (flat-forward)
//! when extrapolation is enabled, and fails with `DateOutOfRange` otherwise.

use std::fmt;
use std::str::FromStr;

use kurva_core::daycounts::DayCountConvention;
use kurva_core::Date;
use kurva_math::interpolation::{Interpolator, LinearInterpolator, LogLinearInterpolator};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Interpolation rule between curve nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Linear in `ln(df)`: piecewise flat instantaneous forwards.
    #[default]
    LogLinearDiscount,
    /// Linear in the continuously compounded zero rate.
    LinearZero,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogLinearDiscount => write!(f, "log_linear_discount"),
            Self::LinearZero => write!(f, "linear_zero"),
        }
    }
}

impl FromStr for Interpolation {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "log_linear_discount" | "log_linear" | "loglinear" => Ok(Self::LogLinearDiscount),
            "linear_zero" | "linear" => Ok(Self::LinearZero),
            _ => Err(CurveError::config(format!("unknown interpolation: '{s}'"))),
        }
    }
}

/// Everything about a curve except its nodes.
///
/// Solvers receive a template and produce nodes; the same template is used
/// while solving and when the finished curve is queried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveTemplate {
    /// Valuation (reference) date; the first node.
    pub valuation_date: Date,
    /// Interpolation between nodes.
    pub interpolation: Interpolation,
    /// Day count used to turn dates into curve times.
    pub day_count: DayCountConvention,
    /// Whether dates outside the nodes are extrapolated flat-forward.
    pub allow_extrapolation: bool,
}

impl CurveTemplate {
    /// Template with log-linear discount interpolation, ACT/365F times and no
    /// extrapolation.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            interpolation: Interpolation::default(),
            day_count: DayCountConvention::Act365Fixed,
            allow_extrapolation: false,
        }
    }

    /// Sets the interpolation.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the time day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Enables or disables flat-forward extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Curve time of `date` in years (negative before the valuation date).
    #[must_use]
    pub fn time(&self, date: Date) -> f64 {
        self.day_count.signed_year_fraction(self.valuation_date, date)
    }
}

#[derive(Debug, Clone)]
enum NodeInterpolator {
    LogDiscount(LogLinearInterpolator),
    Zero(LinearInterpolator),
}

/// An immutable discount curve.
///
/// # Example
///
/// ```rust
/// use kurva_core::Date;
/// use kurva_curves::curve::{CurveTemplate, DiscountCurve};
///
/// let valuation = Date::from_ymd(2023, 1, 11).unwrap();
/// let one_year = Date::from_ymd(2024, 1, 11).unwrap();
/// let curve = DiscountCurve::new(CurveTemplate::new(valuation), vec![(one_year, 0.97)]).unwrap();
///
/// assert_eq!(curve.discount_factor(valuation).unwrap(), 1.0);
/// assert!((curve.discount_factor(one_year).unwrap() - 0.97).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    template: CurveTemplate,
    dates: Vec<Date>,
    times: Vec<f64>,
    dfs: Vec<f64>,
    interpolator: NodeInterpolator,
}

impl DiscountCurve {
    /// Builds a curve from pillar discount factors.
    ///
    /// `pillars` are the nodes after the valuation date; the valuation node
    /// `(valuation_date, 1.0)` is added here. Pillar dates must be strictly
    /// increasing and every discount factor positive and finite.
    pub fn new(template: CurveTemplate, pillars: Vec<(Date, f64)>) -> CurveResult<Self> {
        if pillars.is_empty() {
            return Err(CurveError::invalid_data("curve needs at least one pillar"));
        }

        let mut dates = Vec::with_capacity(pillars.len() + 1);
        let mut dfs = Vec::with_capacity(pillars.len() + 1);
        dates.push(template.valuation_date);
        dfs.push(1.0);

        for (date, df) in pillars {
            let previous = dates[dates.len() - 1];
            if date <= previous {
                return Err(CurveError::invalid_data(format!(
                    "node dates must be strictly increasing: {date} after {previous}"
                )));
            }
            if !(df > 0.0 && df.is_finite()) {
                return Err(CurveError::invalid_data(format!(
                    "discount factor {df} at {date} is not positive"
                )));
            }
            dates.push(date);
            dfs.push(df);
        }

        let times: Vec<f64> = dates.iter().map(|&d| template.time(d)).collect();
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CurveError::invalid_data(format!(
                "{} maps two node dates to the same time",
                template.day_count
            )));
        }

        let interpolator = match template.interpolation {
            Interpolation::LogLinearDiscount => {
                NodeInterpolator::LogDiscount(LogLinearInterpolator::new(times.clone(), dfs.clone())?)
            }
            Interpolation::LinearZero => {
                // Zero rate is flat between the valuation date and the first pillar.
                let mut zeros: Vec<f64> = times
                    .iter()
                    .zip(&dfs)
                    .skip(1)
                    .map(|(t, df)| -df.ln() / t)
                    .collect();
                zeros.insert(0, zeros[0]);
                NodeInterpolator::Zero(LinearInterpolator::new(times.clone(), zeros)?)
            }
        };

        Ok(Self {
            template,
            dates,
            times,
            dfs,
            interpolator,
        })
    }

    /// Builds a curve from continuously compounded pillar zero rates
    /// (curve day count).
    pub fn from_zero_rates(template: CurveTemplate, pillars: &[(Date, f64)]) -> CurveResult<Self> {
        let nodes = pillars
            .iter()
            .map(|&(date, zero)| (date, (-zero * template.time(date)).exp()))
            .collect();
        Self::new(template, nodes)
    }

    /// Returns the template the curve was built with.
    #[must_use]
    pub fn template(&self) -> &CurveTemplate {
        &self.template
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.template.valuation_date
    }

    /// Returns the last node date.
    #[must_use]
    pub fn max_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Returns the interpolation rule.
    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.template.interpolation
    }

    /// All nodes including the valuation node.
    #[must_use]
    pub fn nodes(&self) -> Vec<(Date, f64)> {
        self.dates.iter().copied().zip(self.dfs.iter().copied()).collect()
    }

    /// Node dates after the valuation date.
    #[must_use]
    pub fn pillar_dates(&self) -> &[Date] {
        &self.dates[1..]
    }

    /// Discount factor at `date`.
    ///
    /// Exactly `1.0` at the valuation date.
    pub fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        if date == self.template.valuation_date {
            return Ok(1.0);
        }

        let t = self.template.time(date);
        let last = self.times.len() - 1;

        if date < self.template.valuation_date || date > self.max_date() {
            if !self.template.allow_extrapolation {
                return Err(CurveError::date_out_of_range(
                    date,
                    self.template.valuation_date,
                    self.max_date(),
                ));
            }
            return Ok(if t < 0.0 {
                (-self.segment_forward(1) * t).exp()
            } else {
                self.dfs[last] * (-self.segment_forward(last) * (t - self.times[last])).exp()
            });
        }

        match &self.interpolator {
            NodeInterpolator::LogDiscount(interp) => Ok(interp.interpolate(t)?),
            NodeInterpolator::Zero(interp) => Ok((-interp.interpolate(t)? * t).exp()),
        }
    }

    /// Continuously compounded zero rate to `date` with time measured under
    /// `basis`.
    ///
    /// At the valuation date, where the ratio is undefined, the zero rate of
    /// the first pillar is returned.
    pub fn zero_rate(&self, date: Date, basis: DayCountConvention) -> CurveResult<f64> {
        let yf = basis.signed_year_fraction(self.template.valuation_date, date);
        if yf.abs() < f64::EPSILON {
            let first = self.dates[1];
            let first_yf = basis.signed_year_fraction(self.template.valuation_date, first);
            return Ok(-self.dfs[1].ln() / first_yf);
        }
        Ok(-self.discount_factor(date)?.ln() / yf)
    }

    /// Simple forward rate between two dates under `basis`.
    pub fn forward_rate(&self, start: Date, end: Date, basis: DayCountConvention) -> CurveResult<f64> {
        let tau = basis.year_fraction(start, end)?;
        if tau <= 0.0 {
            return Err(CurveError::invalid_data(format!(
                "forward period {start} to {end} has no length under {basis}"
            )));
        }
        let df_start = self.discount_factor(start)?;
        let df_end = self.discount_factor(end)?;
        Ok((df_start / df_end - 1.0) / tau)
    }

    /// Continuously compounded forward over node segment `i` (ending at node `i`).
    fn segment_forward(&self, i: usize) -> f64 {
        -(self.dfs[i] / self.dfs[i - 1]).ln() / (self.times[i] - self.times[i - 1])
    }
}
