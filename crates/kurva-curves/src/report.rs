//! Zero rate tables and comparison against reference zero rates.

use std::fmt;

use kurva_core::daycounts::DayCountConvention;
use kurva_core::Date;

use crate::curve::DiscountCurve;
use crate::error::CurveResult;

/// Continuously compounded zero rates of `curve` at `dates` under `basis`.
pub fn zero_rate_table(
    curve: &DiscountCurve,
    dates: &[Date],
    basis: DayCountConvention,
) -> CurveResult<Vec<(Date, f64)>> {
    dates
        .iter()
        .map(|&date| Ok((date, curve.zero_rate(date, basis)?)))
        .collect()
}

/// A reference zero rate to compare against. Rates are decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRow {
    /// Date of the reference zero rate.
    pub date: Date,
    /// Reference continuously compounded zero rate.
    pub reference_zero_rate: f64,
    /// Market quote of the instrument with this pillar, if any.
    pub quoted_input: Option<f64>,
}

impl ReferenceRow {
    /// Creates a row without a quoted input.
    #[must_use]
    pub fn new(date: Date, reference_zero_rate: f64) -> Self {
        Self {
            date,
            reference_zero_rate,
            quoted_input: None,
        }
    }

    /// Attaches the input quote shown alongside the row.
    #[must_use]
    pub fn with_quoted_input(mut self, quote: f64) -> Self {
        self.quoted_input = Some(quote);
        self
    }
}

/// One line of a [`ComparisonReport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    /// Date compared.
    pub date: Date,
    /// Input quote, if given.
    pub quoted_input: Option<f64>,
    /// Zero rate from the curve.
    pub computed_zero_rate: f64,
    /// Reference zero rate.
    pub reference_zero_rate: f64,
    /// `(computed - reference) × 10 000`.
    pub bp_difference: f64,
}

/// Computed vs reference zero rates.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    basis: DayCountConvention,
    rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    /// Rows in reference order.
    #[must_use]
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Day count the zero rates are quoted on.
    #[must_use]
    pub fn basis(&self) -> DayCountConvention {
        self.basis
    }

    /// Largest absolute difference in basis points (0 for an empty report).
    #[must_use]
    pub fn max_abs_bp_difference(&self) -> f64 {
        self.rows.iter().map(|r| r.bp_difference.abs()).fold(0.0, f64::max)
    }

    /// Mean absolute difference in basis points (0 for an empty report).
    #[must_use]
    pub fn mean_abs_bp_difference(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.bp_difference.abs()).sum::<f64>() / self.rows.len() as f64
    }
}

/// Compares the curve's zero rates with `reference` rows.
pub fn compare(
    curve: &DiscountCurve,
    reference: &[ReferenceRow],
    basis: DayCountConvention,
) -> CurveResult<ComparisonReport> {
    let rows = reference
        .iter()
        .map(|row| {
            let computed = curve.zero_rate(row.date, basis)?;
            Ok(ComparisonRow {
                date: row.date,
                quoted_input: row.quoted_input,
                computed_zero_rate: computed,
                reference_zero_rate: row.reference_zero_rate,
                bp_difference: (computed - row.reference_zero_rate) * 10_000.0,
            })
        })
        .collect::<CurveResult<Vec<_>>>()?;

    Ok(ComparisonReport { basis, rows })
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Zero rates (continuous, {})", self.basis)?;
        writeln!(
            f,
            "{:<10} {:>10} {:>12} {:>12} {:>9}",
            "Date", "Quote %", "Computed %", "Reference %", "Diff bp"
        )?;
        for row in &self.rows {
            let quote = row
                .quoted_input
                .map_or_else(|| "-".to_string(), |q| format!("{:.4}", q * 100.0));
            writeln!(
                f,
                "{:<10} {:>10} {:>12.4} {:>12.4} {:>9.3}",
                row.date.to_string(),
                quote,
                row.computed_zero_rate * 100.0,
                row.reference_zero_rate * 100.0,
                row.bp_difference
            )?;
        }
        write!(
            f,
            "max |diff| = {:.3} bp, mean |diff| = {:.3} bp",
            self.max_abs_bp_difference(),
            self.mean_abs_bp_difference()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveTemplate;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn curve() -> DiscountCurve {
        DiscountCurve::from_zero_rates(
            CurveTemplate::new(d(2023, 1, 11)),
            &[(d(2024, 1, 11), 0.03), (d(2026, 1, 11), 0.032)],
        )
        .unwrap()
    }

    #[test]
    fn test_zero_rate_table() {
        let table = zero_rate_table(
            &curve(),
            &[d(2024, 1, 11), d(2026, 1, 11)],
            DayCountConvention::Act365Fixed,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_relative_eq!(table[0].1, 0.03, epsilon = 1e-14);
        assert_relative_eq!(table[1].1, 0.032, epsilon = 1e-14);
    }

    #[test]
    fn test_compare_differences_in_bp() {
        let reference = [
            ReferenceRow::new(d(2024, 1, 11), 0.0301).with_quoted_input(0.0305),
            ReferenceRow::new(d(2026, 1, 11), 0.0318),
        ];
        let report = compare(&curve(), &reference, DayCountConvention::Act365Fixed).unwrap();

        assert_relative_eq!(report.rows()[0].bp_difference, -1.0, epsilon = 1e-9);
        assert_relative_eq!(report.rows()[1].bp_difference, 2.0, epsilon = 1e-9);
        assert_relative_eq!(report.max_abs_bp_difference(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(report.mean_abs_bp_difference(), 1.5, epsilon = 1e-9);

        let text = report.to_string();
        assert!(text.contains("2024-01-11"));
        assert!(text.contains("3.0500"));
        assert!(text.contains("max |diff| = 2.000 bp"));
    }

    #[test]
    fn test_compare_propagates_range_errors() {
        let reference = [ReferenceRow::new(d(2030, 1, 11), 0.03)];
        assert!(compare(&curve(), &reference, DayCountConvention::Act365Fixed).is_err());
    }
}
