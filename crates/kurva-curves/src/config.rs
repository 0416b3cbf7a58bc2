//! Curve configuration files.
//!
//! A curve is described in TOML or JSON:
//!
//! ```toml
//! name = "SEK-STIBOR-6M"
//! valuation_date = "2023-01-11"
//! interpolation = "log_linear_discount"
//! method = "sequential"
//!
//! [[instruments]]
//! instrument_type = "deposit"
//! quote_rate = 3.218
//! tenor = "6M"
//! calendar_id = "STOCKHOLM"
//! day_count_basis = "ACT/360"
//!
//! [[instruments]]
//! instrument_type = "swap"
//! bid = 3.5127
//! ask = 3.5327
//! tenor = "1Y"
//! day_count_basis = "30/360"
//! float_tenor = "6M"
//! float_day_count = "ACT/360"
//! ```
//!
//! Quotes and reference zero rates are in percent.

use std::fmt;
use std::path::Path;

use kurva_core::calendars::{BusinessDayConvention, CalendarId};
use kurva_core::daycounts::DayCountConvention;
use kurva_core::{Date, Frequency, Tenor};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::bootstrap::BootstrapMethod;
use crate::builder::CurveBuilder;
use crate::curve::Interpolation;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Deposit, DepositConventions, Swap, SwapConventions};
use crate::quote::Quote;
use crate::report::ReferenceRow;

/// File format of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML.
    Toml,
    /// JSON.
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> CurveResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(CurveError::config(format!(
                "cannot tell the format of '{}' (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    fn parse<T: DeserializeOwned>(self, text: &str) -> CurveResult<T> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| CurveError::config(e.to_string())),
            Self::Json => serde_json::from_str(text).map_err(|e| CurveError::config(e.to_string())),
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> CurveResult<T> {
    let format = ConfigFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .map_err(|e| CurveError::config(format!("cannot read '{}': {e}", path.display())))?;
    format.parse(&text)
}

fn percent_to_rate(percent: Decimal) -> CurveResult<f64> {
    (percent / Decimal::ONE_HUNDRED)
        .to_f64()
        .ok_or_else(|| CurveError::config(format!("{percent}% is not representable")))
}

/// Instrument kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Money market deposit.
    Deposit,
    /// Fixed-vs-floating swap.
    Swap,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Swap => write!(f, "swap"),
        }
    }
}

fn default_fixing_lag() -> u32 {
    2
}

fn default_weight() -> f64 {
    1.0
}

fn default_float_tenor() -> Tenor {
    Tenor::months(6)
}

fn default_calendar_id() -> String {
    CalendarId::default().as_str().to_string()
}

fn default_business_day_convention() -> String {
    "ModifiedFollowing".to_string()
}

fn default_curve_day_count() -> String {
    DayCountConvention::default().name().to_string()
}

fn parse_day_count(name: Option<&str>, fallback: DayCountConvention) -> CurveResult<DayCountConvention> {
    match name {
        Some(name) => Ok(name.parse()?),
        None => Ok(fallback),
    }
}

/// One instrument of a curve configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Deposit or swap.
    pub instrument_type: InstrumentKind,
    /// One-way quote in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_rate: Option<Decimal>,
    /// Bid in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<Decimal>,
    /// Ask in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<Decimal>,
    /// Instrument tenor.
    pub tenor: Tenor,
    /// Calendar id, e.g. `"STOCKHOLM"`.
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// Business day convention, e.g. `"ModifiedFollowing"`.
    #[serde(default = "default_business_day_convention")]
    pub business_day_convention: String,
    /// Deposit basis, or the swap's fixed leg basis. Defaults to ACT/360
    /// for deposits and 30/360 for swaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_count_basis: Option<String>,
    /// Swap fixed leg frequency.
    #[serde(default)]
    pub fixed_frequency: Frequency,
    /// Swap floating index tenor.
    #[serde(default = "default_float_tenor")]
    pub float_tenor: Tenor,
    /// Swap floating leg basis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_day_count: Option<String>,
    /// Business days from valuation to start.
    #[serde(default = "default_fixing_lag")]
    pub fixing_lag_days: u32,
    /// Least-squares weight.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl InstrumentConfig {
    /// The quote given either as `quote_rate` or as `bid` and `ask`.
    pub fn quote(&self) -> CurveResult<Quote> {
        match (self.quote_rate, self.bid, self.ask) {
            (Some(rate), None, None) => Quote::percent(rate),
            (None, Some(bid), Some(ask)) => Quote::bid_ask(bid, ask),
            _ => Err(CurveError::config(format!(
                "{} {}: give either quote_rate or both bid and ask",
                self.instrument_type, self.tenor
            ))),
        }
    }

    /// The calendar named by `calendar_id`.
    pub fn calendar(&self) -> CurveResult<CalendarId> {
        Ok(self.calendar_id.parse()?)
    }

    /// The convention named by `business_day_convention`.
    pub fn convention(&self) -> CurveResult<BusinessDayConvention> {
        Ok(self.business_day_convention.parse()?)
    }

    /// Deposit conventions from this entry.
    ///
    /// Unknown calendar, convention or day count names fail with
    /// [`CurveError::InvalidCalendarOrConvention`].
    pub fn deposit_conventions(&self) -> CurveResult<DepositConventions> {
        Ok(DepositConventions::default()
            .with_calendar(self.calendar()?)
            .with_convention(self.convention()?)
            .with_day_count(parse_day_count(
                self.day_count_basis.as_deref(),
                DayCountConvention::Act360,
            )?)
            .with_fixing_lag(self.fixing_lag_days))
    }

    /// Swap conventions from this entry.
    ///
    /// Unknown calendar, convention or day count names fail with
    /// [`CurveError::InvalidCalendarOrConvention`].
    pub fn swap_conventions(&self) -> CurveResult<SwapConventions> {
        Ok(SwapConventions::default()
            .with_calendar(self.calendar()?)
            .with_convention(self.convention()?)
            .with_fixed_leg(
                self.fixed_frequency,
                parse_day_count(self.day_count_basis.as_deref(), DayCountConvention::Thirty360US)?,
            )
            .with_float_leg(
                self.float_tenor,
                parse_day_count(self.float_day_count.as_deref(), DayCountConvention::Act360)?,
            )
            .with_spot_lag(self.fixing_lag_days))
    }
}

/// A reference zero rate row, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRowConfig {
    /// Date of the reference rate.
    pub date: Date,
    /// Reference continuously compounded zero rate in percent.
    pub reference_zero_rate: Decimal,
    /// Input quote in percent, shown alongside.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_input: Option<Decimal>,
}

impl ReferenceRowConfig {
    /// Converts to a [`ReferenceRow`] with decimal rates.
    pub fn to_row(&self) -> CurveResult<ReferenceRow> {
        let row = ReferenceRow::new(self.date, percent_to_rate(self.reference_zero_rate)?);
        match self.quoted_input {
            Some(quote) => Ok(row.with_quoted_input(percent_to_rate(quote)?)),
            None => Ok(row),
        }
    }
}

/// A standalone reference table file (`[[rows]]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    /// Reference rows.
    pub rows: Vec<ReferenceRowConfig>,
}

impl ReferenceTable {
    /// Parses a TOML table.
    pub fn from_toml_str(text: &str) -> CurveResult<Self> {
        ConfigFormat::Toml.parse(text)
    }

    /// Parses a JSON table.
    pub fn from_json_str(text: &str) -> CurveResult<Self> {
        ConfigFormat::Json.parse(text)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> CurveResult<Self> {
        load(path.as_ref())
    }

    /// Rows with decimal rates.
    pub fn to_rows(&self) -> CurveResult<Vec<ReferenceRow>> {
        self.rows.iter().map(ReferenceRowConfig::to_row).collect()
    }
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_max_iterations() -> u32 {
    100
}

/// A complete curve description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Curve name.
    pub name: String,
    /// Valuation date.
    pub valuation_date: Date,
    /// Interpolation between nodes.
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Bootstrap method.
    #[serde(default)]
    pub method: BootstrapMethod,
    /// Curve time day count, e.g. `"ACT/365F"`.
    #[serde(default = "default_curve_day_count")]
    pub day_count: String,
    /// Flat-forward extrapolation outside the nodes.
    #[serde(default)]
    pub allow_extrapolation: bool,
    /// Solver tolerance.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Solver iteration limit.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Calibration instruments.
    pub instruments: Vec<InstrumentConfig>,
    /// Optional reference zero rates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<ReferenceRowConfig>,
}

impl CurveConfig {
    /// Parses a TOML configuration.
    pub fn from_toml_str(text: &str) -> CurveResult<Self> {
        ConfigFormat::Toml.parse(text)
    }

    /// Parses a JSON configuration.
    pub fn from_json_str(text: &str) -> CurveResult<Self> {
        ConfigFormat::Json.parse(text)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> CurveResult<Self> {
        load(path.as_ref())
    }

    /// Serializes to pretty JSON.
    pub fn to_json_string(&self) -> CurveResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CurveError::config(e.to_string()))
    }

    /// The day count named by `day_count`.
    pub fn curve_day_count(&self) -> CurveResult<DayCountConvention> {
        Ok(self.day_count.parse()?)
    }

    /// Constructs the instruments and returns a ready builder.
    pub fn to_builder(&self) -> CurveResult<CurveBuilder> {
        if self.instruments.is_empty() {
            return Err(CurveError::config(format!("curve '{}' has no instruments", self.name)));
        }

        let mut builder = CurveBuilder::new(self.valuation_date)
            .with_name(self.name.clone())
            .with_interpolation(self.interpolation)
            .with_day_count(self.curve_day_count()?)
            .with_extrapolation(self.allow_extrapolation)
            .with_method(self.method)
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations);

        for entry in &self.instruments {
            let quote = entry.quote()?;
            builder = match entry.instrument_type {
                InstrumentKind::Deposit => {
                    let deposit = Deposit::new(
                        self.valuation_date,
                        entry.tenor,
                        quote,
                        entry.deposit_conventions()?,
                    )?;
                    builder.add_weighted(deposit, entry.weight)?
                }
                InstrumentKind::Swap => {
                    let swap = Swap::new(self.valuation_date, entry.tenor, quote, entry.swap_conventions()?)?;
                    builder.add_weighted(swap, entry.weight)?
                }
            };
        }

        Ok(builder)
    }

    /// Reference rows with decimal rates.
    pub fn reference_rows(&self) -> CurveResult<Vec<ReferenceRow>> {
        self.reference.iter().map(ReferenceRowConfig::to_row).collect()
    }
}
