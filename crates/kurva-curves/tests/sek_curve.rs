//! Integration test: SEK swap curve against 6M STIBOR.
//!
//! Valuation 2023-01-11, Stockholm calendar, T+2 spot (2023-01-13).
//!
//! | Instrument | Quote    |
//! |------------|----------|
//! | 6M STIBOR  | 3.218%   |
//! | 1Y swap    | 3.5227%  |
//! | 2Y-25Y     | see `data/sek_stibor6m.toml` |
//! | 30Y swap   | 2.5631%  |
//!
//! Reference: continuous ACT/365F zero rate at 2023-07-13 of 3.2366%.

use approx::assert_relative_eq;
use kurva_core::calendars::CalendarId;
use kurva_core::daycounts::DayCountConvention;
use kurva_core::{Date, Frequency, Tenor};
use kurva_curves::prelude::*;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn data_path(file: &str) -> String {
    format!("{}/tests/data/{file}", env!("CARGO_MANIFEST_DIR"))
}

fn sek_config() -> CurveConfig {
    CurveConfig::from_path(data_path("sek_stibor6m.toml")).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_sek_six_month_zero_rate_matches_reference() {
    init_tracing();
    let config = sek_config();
    let result = config.to_builder().unwrap().build().unwrap();

    let report = compare(
        &result.curve,
        &config.reference_rows().unwrap(),
        DayCountConvention::Act365Fixed,
    )
    .unwrap();
    println!("{report}");

    assert_eq!(report.rows()[0].date, d(2023, 7, 13));
    assert!(
        report.max_abs_bp_difference() < 0.02,
        "6M zero rate off by {:.4} bp",
        report.max_abs_bp_difference()
    );
}

#[test]
fn test_sek_curve_reprices_every_input() {
    let config = sek_config();
    let builder = config.to_builder().unwrap();
    let result = builder.build().unwrap();

    assert_eq!(builder.instruments().len(), 16);
    assert_eq!(result.curve.pillar_dates().len(), 16);
    assert_eq!(result.curve.max_date(), d(2053, 1, 13));
    assert!(result.is_valid(), "{}", result.report);

    for instrument in builder.instruments() {
        assert_relative_eq!(
            instrument.implied_rate(&result.curve).unwrap(),
            instrument.quote().rate(),
            epsilon = 1e-10
        );
    }
}

#[test]
fn test_sek_curve_shape() {
    let result = sek_config().to_builder().unwrap().build().unwrap();
    let curve = &result.curve;

    assert_eq!(curve.discount_factor(d(2023, 1, 11)).unwrap(), 1.0);

    let nodes = curve.nodes();
    assert!(
        nodes.windows(2).all(|w| w[1].1 < w[0].1),
        "discount factors must decrease"
    );

    for &pillar in curve.pillar_dates() {
        let zero = curve.zero_rate(pillar, DayCountConvention::Act365Fixed).unwrap();
        assert!(zero > 0.02 && zero < 0.04, "zero rate {zero} at {pillar}");
    }
}

#[test]
fn test_sequential_and_global_agree() {
    let config = sek_config();
    let sequential = config
        .to_builder()
        .unwrap()
        .with_method(BootstrapMethod::Sequential)
        .build()
        .unwrap();
    let global = config
        .to_builder()
        .unwrap()
        .with_method(BootstrapMethod::GlobalLeastSquares)
        .build()
        .unwrap();

    assert!(global.is_valid(), "{}", global.report);
    for (a, b) in sequential.curve.nodes().iter().zip(global.curve.nodes()) {
        assert_eq!(a.0, b.0);
        assert_relative_eq!(a.1, b.1, epsilon = 1e-8);
    }
}

#[test]
fn test_zero_rate_beyond_last_node() {
    let config = sek_config();
    let result = config.to_builder().unwrap().build().unwrap();

    let err = result
        .curve
        .zero_rate(d(2060, 1, 13), DayCountConvention::Act365Fixed)
        .unwrap_err();
    assert_eq!(
        err,
        CurveError::DateOutOfRange {
            date: d(2060, 1, 13),
            min: d(2023, 1, 11),
            max: d(2053, 1, 13),
        }
    );

    let extrapolated = config
        .to_builder()
        .unwrap()
        .with_extrapolation(true)
        .build()
        .unwrap();
    let zero = extrapolated
        .curve
        .zero_rate(d(2060, 1, 13), DayCountConvention::Act365Fixed)
        .unwrap();
    assert!(zero.is_finite() && zero > 0.0);
}

#[test]
fn test_out_of_order_instruments() {
    let mut config = sek_config();
    config.instruments.swap(3, 7);

    let err = config.to_builder().unwrap().build().unwrap_err();
    assert!(matches!(err, CurveError::OutOfOrderInstrument { .. }), "{err}");

    // The global fit does not depend on order
    config.method = BootstrapMethod::GlobalLeastSquares;
    assert!(config.to_builder().unwrap().build().unwrap().is_valid());
}

#[test]
fn test_target_deposit_discount_factor() {
    let valuation = d(2023, 1, 11);
    let conventions = DepositConventions::default()
        .with_calendar(CalendarId::Target)
        .with_fixing_lag(0);
    let result = CurveBuilder::new(valuation)
        .deposit(Tenor::months(6), Quote::percent(dec!(3.218)).unwrap(), conventions)
        .unwrap()
        .build()
        .unwrap();

    let maturity = d(2023, 7, 11);
    let tau = DayCountConvention::Act360.year_fraction(valuation, maturity).unwrap();
    assert_relative_eq!(tau, 181.0 / 360.0, epsilon = 1e-15);
    assert_relative_eq!(
        result.curve.discount_factor(maturity).unwrap(),
        1.0 / (1.0 + 0.03218 * tau),
        epsilon = 1e-11
    );
}

#[test]
fn test_weighted_overdetermined_fit() {
    let valuation = d(2023, 1, 11);
    let quarterly = SwapConventions::default()
        .with_fixed_leg(Frequency::Quarterly, DayCountConvention::Thirty360US);
    let extra = Swap::new(
        valuation,
        Tenor::years(5),
        Quote::percent(dec!(2.8205)).unwrap(),
        quarterly,
    )
    .unwrap();

    // Two 5Y swaps share a pillar but disagree by about 7bp
    let result = sek_config()
        .to_builder()
        .unwrap()
        .with_method(BootstrapMethod::GlobalLeastSquares)
        .add_weighted(extra, 0.25)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(result.curve.pillar_dates().len(), 16);
    assert!(!result.is_valid());

    let five_year = result
        .report
        .checks()
        .iter()
        .filter(|c| c.pillar == d(2028, 1, 13))
        .collect::<Vec<_>>();
    assert_eq!(five_year.len(), 2);
    // The unit-weight quote is missed by less than the quarter-weight one
    assert!(five_year[0].error_bp.abs() < five_year[1].error_bp.abs());
    assert!(five_year[0].error_bp < 0.0 && five_year[1].error_bp > 0.0);
}

#[test]
fn test_parallel_builds() {
    let config = sek_config();
    let builders = vec![
        config.to_builder().unwrap(),
        config.to_builder().unwrap().with_method(BootstrapMethod::GlobalLeastSquares),
        config.to_builder().unwrap().with_interpolation(Interpolation::LinearZero),
    ];

    let results = build_curves_parallel(&builders);
    assert_eq!(results.len(), 3);
    for result in results {
        let result = result.unwrap();
        assert!(result.is_valid(), "{}", result.report);
        assert_relative_eq!(
            result
                .curve
                .zero_rate(d(2023, 7, 13), DayCountConvention::Act365Fixed)
                .unwrap(),
            0.032366,
            epsilon = 2e-7
        );
    }
}

#[test]
fn test_reference_table_file() {
    let table = ReferenceTable::from_path(data_path("sek_reference.json")).unwrap();
    let from_config = sek_config().reference_rows().unwrap();
    assert_eq!(table.to_rows().unwrap(), from_config);
}

#[test]
fn test_zero_rate_table_at_pillars() {
    let result = sek_config().to_builder().unwrap().build().unwrap();
    let pillars = result.curve.pillar_dates().to_vec();
    let table = zero_rate_table(&result.curve, &pillars, DayCountConvention::Act365Fixed).unwrap();
    assert_eq!(table.len(), pillars.len());
    assert_eq!(table[0].0, d(2023, 7, 13));
}
