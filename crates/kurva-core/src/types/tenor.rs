//! Tenors such as `6M` or `10Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Weeks (7 calendar days)
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// A period length expressed as a count of days, weeks, months or years.
///
/// Parsed from market notation: `"1D"`, `"2W"`, `"6M"`, `"10Y"`, and the
/// overnight alias `"ON"` (one day).
///
/// # Example
///
/// ```rust
/// use kurva_core::types::{Date, Tenor};
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// let start = Date::from_ymd(2023, 1, 13).unwrap();
/// assert_eq!(tenor.add_to(start).unwrap(), Date::from_ymd(2023, 7, 13).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    length: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a new tenor.
    #[must_use]
    pub const fn new(length: i32, unit: TenorUnit) -> Self {
        Self { length, unit }
    }

    /// Creates a tenor of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TenorUnit::Months)
    }

    /// Creates a tenor of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TenorUnit::Years)
    }

    /// Returns the number of units.
    #[must_use]
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Returns the tenor as a whole number of months, if it is month-based.
    #[must_use]
    pub fn total_months(&self) -> Option<i32> {
        match self.unit {
            TenorUnit::Months => Some(self.length),
            TenorUnit::Years => Some(self.length * 12),
            TenorUnit::Days | TenorUnit::Weeks => None,
        }
    }

    /// Returns the tenor scaled by `factor` (e.g. the i-th period of a schedule).
    #[must_use]
    pub fn times(&self, factor: i32) -> Self {
        Self::new(self.length * factor, self.unit)
    }

    /// Adds the tenor to an unadjusted date.
    ///
    /// Month and year tenors clamp to the end of the target month.
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        match self.unit {
            TenorUnit::Days => Ok(date.add_days(i64::from(self.length))),
            TenorUnit::Weeks => Ok(date.add_days(7 * i64::from(self.length))),
            TenorUnit::Months => date.add_months(self.length),
            TenorUnit::Years => date.add_years(self.length),
        }
    }

    /// Approximate length in years, used for sorting and initial guesses.
    #[must_use]
    pub fn approx_years(&self) -> f64 {
        let n = f64::from(self.length);
        match self.unit {
            TenorUnit::Days => n / 365.0,
            TenorUnit::Weeks => n * 7.0 / 365.0,
            TenorUnit::Months => n / 12.0,
            TenorUnit::Years => n,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_uppercase();

        if matches!(text.as_str(), "ON" | "O/N") {
            return Ok(Self::new(1, TenorUnit::Days));
        }

        let unit = match text.chars().last() {
            Some('D') => TenorUnit::Days,
            Some('W') => TenorUnit::Weeks,
            Some('M') => TenorUnit::Months,
            Some('Y') => TenorUnit::Years,
            _ => return Err(CoreError::invalid_tenor(s)),
        };

        let length: i32 = text[..text.len() - 1]
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s))?;

        if length <= 0 {
            return Err(CoreError::invalid_tenor(s));
        }

        Ok(Self::new(length, unit))
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("6M".parse::<Tenor>().unwrap(), Tenor::months(6));
        assert_eq!("10y".parse::<Tenor>().unwrap(), Tenor::years(10));
        assert_eq!("2W".parse::<Tenor>().unwrap(), Tenor::new(2, TenorUnit::Weeks));
        assert_eq!("ON".parse::<Tenor>().unwrap(), Tenor::new(1, TenorUnit::Days));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("6X".parse::<Tenor>().is_err());
        assert!("M".parse::<Tenor>().is_err());
        assert!("0Y".parse::<Tenor>().is_err());
        assert!("".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let tenor = Tenor::years(30);
        assert_eq!(tenor.to_string(), "30Y");
        assert_eq!(tenor.to_string().parse::<Tenor>().unwrap(), tenor);
    }

    #[test]
    fn test_total_months() {
        assert_eq!(Tenor::years(2).total_months(), Some(24));
        assert_eq!(Tenor::months(6).total_months(), Some(6));
        assert_eq!(Tenor::new(2, TenorUnit::Weeks).total_months(), None);
    }

    #[test]
    fn test_add_to() {
        let start = Date::from_ymd(2023, 1, 13).unwrap();
        assert_eq!(
            Tenor::years(1).add_to(start).unwrap(),
            Date::from_ymd(2024, 1, 13).unwrap()
        );
        assert_eq!(
            Tenor::new(1, TenorUnit::Weeks).add_to(start).unwrap(),
            Date::from_ymd(2023, 1, 20).unwrap()
        );
    }

    #[test]
    fn test_serde_as_string() {
        let tenor: Tenor = serde_json::from_str("\"6M\"").unwrap();
        assert_eq!(tenor, Tenor::months(6));
        assert_eq!(serde_json::to_string(&tenor).unwrap(), "\"6M\"");
        assert!(serde_json::from_str::<Tenor>("\"six months\"").is_err());
    }
}
