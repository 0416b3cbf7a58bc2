//! Payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Tenor;

/// Payment frequency of a swap leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year) - SEK/EUR fixed legs
    #[serde(alias = "annual", alias = "ANNUAL")]
    #[default]
    Annual,
    /// Semi-annual payments (2 per year)
    #[serde(alias = "semi_annual", alias = "SEMIANNUAL")]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    #[serde(alias = "quarterly", alias = "QUARTERLY")]
    Quarterly,
    /// Monthly payments (12 per year)
    #[serde(alias = "monthly", alias = "MONTHLY")]
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> i32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Monthly => 1,
        }
    }

    /// Returns the accrual period as a tenor.
    #[must_use]
    pub fn tenor(&self) -> Tenor {
        Tenor::months(self.months_per_period())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "ANNUAL" | "A" | "1Y" | "12M" => Ok(Frequency::Annual),
            "SEMIANNUAL" | "S" | "6M" => Ok(Frequency::SemiAnnual),
            "QUARTERLY" | "Q" | "3M" => Ok(Frequency::Quarterly),
            "MONTHLY" | "M" | "1M" => Ok(Frequency::Monthly),
            _ => Err(CoreError::invalid_convention(format!(
                "unknown frequency: '{s}'"
            ))),
        }
    }
}
