//! Property tests for bootstrapped curves.

use kurva_core::daycounts::DayCountConvention;
use kurva_core::{Date, Tenor};
use kurva_curves::prelude::*;
use proptest::prelude::*;

/// Valuation date, 6M deposit quote and an upward-sloping 1Y-10Y swap strip.
fn market() -> impl Strategy<Value = (Date, f64, Vec<f64>)> {
    (0i64..365, 0.005f64..0.06, 0.0f64..0.002).prop_map(|(offset, base, slope)| {
        let valuation = Date::from_ymd(2023, 1, 2).unwrap().add_days(offset);
        let swaps = (1..=10).map(|years| base + slope * f64::from(years)).collect();
        (valuation, base, swaps)
    })
}

fn builder(valuation: Date, deposit: f64, swaps: &[f64]) -> CurveBuilder {
    let mut builder = CurveBuilder::new(valuation)
        .deposit(
            Tenor::months(6),
            Quote::from_rate(deposit).unwrap(),
            DepositConventions::default(),
        )
        .unwrap();
    for (years, &rate) in (1..).zip(swaps) {
        builder = builder
            .swap(Tenor::years(years), Quote::from_rate(rate).unwrap(), SwapConventions::default())
            .unwrap();
    }
    builder
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn bootstrapped_curve_reprices_inputs((valuation, deposit, swaps) in market()) {
        let builder = builder(valuation, deposit, &swaps);
        let result = builder.build().unwrap();
        for instrument in builder.instruments() {
            let implied = instrument.implied_rate(&result.curve).unwrap();
            prop_assert!((implied - instrument.quote().rate()).abs() < 1e-10);
        }
    }

    #[test]
    fn discount_factors_decrease_from_one((valuation, deposit, swaps) in market()) {
        let curve = builder(valuation, deposit, &swaps).build().unwrap().curve;
        prop_assert_eq!(curve.discount_factor(valuation).unwrap(), 1.0);

        let nodes = curve.nodes();
        for pair in nodes.windows(2) {
            prop_assert!(pair[1].1 < pair[0].1, "{:?} then {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn zero_rates_non_negative_and_continuous(
        (valuation, deposit, swaps) in market(),
        day in 1i64..3650,
    ) {
        let curve = builder(valuation, deposit, &swaps).build().unwrap().curve;
        let date = valuation.add_days(day);
        prop_assume!(date.add_days(1) <= curve.max_date());

        let z0 = curve.zero_rate(date, DayCountConvention::Act365Fixed).unwrap();
        let z1 = curve.zero_rate(date.add_days(1), DayCountConvention::Act365Fixed).unwrap();
        prop_assert!(z0 >= 0.0 && z1 >= 0.0);
        prop_assert!((z1 - z0).abs() < 2e-3, "jump from {} to {} at {}", z0, z1, date);
    }

    #[test]
    fn global_fit_matches_sequential((valuation, deposit, swaps) in market()) {
        let builder = builder(valuation, deposit, &swaps);
        let sequential = builder.build().unwrap().curve;
        let global = builder
            .with_method(BootstrapMethod::GlobalLeastSquares)
            .build()
            .unwrap()
            .curve;
        for (a, b) in sequential.nodes().iter().zip(global.nodes()) {
            prop_assert!((a.1 - b.1).abs() < 1e-8);
        }
    }
}
