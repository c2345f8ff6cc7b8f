//! End-to-end projection scenarios on a flat curve with fixed-rate bonds.

use std::sync::Arc;

use alm_core::prelude::*;
use alm_engine::prelude::*;
use alm_instruments::{CashflowLeg, FixedRateBondTemplate, FlatForward};
use alm_portfolio::Portfolio;
use approx::assert_relative_eq;

// =============================================================================
// FIXTURES
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn valuation_date() -> Date {
    Date::from_ymd(2024, 1, 31).unwrap()
}

fn curve() -> Arc<dyn YieldCurve> {
    Arc::new(FlatForward::new(0.04).unwrap())
}

fn mix(curve: &Arc<dyn YieldCurve>) -> Vec<StrategyWeight> {
    let long = FixedRateBondTemplate::new(Period::Years(10), 0.05, Arc::clone(curve)).unwrap();
    let short = FixedRateBondTemplate::new(Period::Years(5), 0.035, Arc::clone(curve)).unwrap();
    vec![
        StrategyWeight::new(Arc::new(long), 0.5),
        StrategyWeight::new(Arc::new(short), 0.5),
    ]
}

/// Quarterly benefit payments over two years.
fn liabilities(curve: &Arc<dyn YieldCurve>, amount: f64) -> Portfolio {
    let dates: Vec<Date> = (1..=8)
        .map(|q| valuation_date().add_months(3 * q).unwrap())
        .collect();
    let leg = CashflowLeg::level(dates, amount, Arc::clone(curve)).unwrap();

    Portfolio::builder().add_unit(Arc::new(leg)).build().unwrap()
}

fn engine(initial_cash: f64, benefit: f64, config: ProjectionConfig) -> ProjectionEngine {
    let curve = curve();
    ProjectionEngine::new(
        Portfolio::new(),
        liabilities(&curve, benefit),
        initial_cash,
        mix(&curve),
        config,
    )
    .unwrap()
}

// =============================================================================
// STRATEGIES ON BONDS
// =============================================================================

#[test]
fn reinvest_then_sell_ten_percent() {
    init_tracing();
    let as_of = valuation_date();
    let config = ProjectionConfig::default();
    let reinvestment = ReinvestmentStrategy::from_config(mix(&curve()), &config).unwrap();
    let disinvestment = DisinvestmentStrategy::new(config.shortfall);

    let mut assets = Portfolio::new();
    let mut cash = 100_000.0;
    reinvestment.apply(&mut assets, &mut cash, as_of).unwrap();

    assert_eq!(cash, 0.0);
    assert_eq!(assets.len(), 2);
    assert_relative_eq!(assets.present_value(as_of), 100_000.0, max_relative = 1e-7);
    for position in assets.iter() {
        assert_relative_eq!(position.present_value(as_of), 50_000.0, max_relative = 1e-7);
    }

    let mut cash = -10_000.0;
    disinvestment.apply(&mut assets, &mut cash, as_of).unwrap();

    assert_eq!(cash, 0.0);
    assert_relative_eq!(assets.present_value(as_of), 90_000.0, max_relative = 1e-7);
}

#[test]
fn calibrated_bond_reprices_to_target() {
    let as_of = valuation_date();
    let family = FixedRateBondTemplate::new(Period::Years(10), 0.05, curve()).unwrap();
    let calibrator = Calibrator::default();

    for target in [0.5, 125.0, 50_000.0, 2.5e7] {
        let result = calibrator
            .solve(&family, &calibrator.target(target), as_of)
            .unwrap();
        let tolerance = calibrator.target(target).absolute_tolerance();
        assert!(
            (result.instrument.present_value(as_of) - target).abs() <= tolerance,
            "target {target}: residual {}",
            result.residual
        );
        // 5% coupon on a 4% curve trades above par
        assert!(result.notional < target);
    }
}

// =============================================================================
// PROJECTION
// =============================================================================

#[test]
fn cash_is_conserved_at_every_step() {
    init_tracing();
    let mut engine = engine(100_000.0, 3_000.0, ProjectionConfig::default());
    let samples = engine
        .project(valuation_date(), valuation_date().add_years(3).unwrap(), Period::Months(1))
        .unwrap()
        .to_vec();

    let mut carried = engine.initial_cash();
    for sample in &samples {
        assert_relative_eq!(
            sample.cash,
            carried + sample.asset_cf - sample.liability_cf,
            epsilon = 1e-6
        );
        carried = sample.residual_cash;
    }
    assert_eq!(engine.cash(), carried);

    let liability_total: f64 = samples.iter().map(|s| s.liability_cf).sum();
    assert_relative_eq!(liability_total, 8.0 * 3_000.0, epsilon = 1e-9);
}

#[test]
fn surplus_is_fully_reinvested() {
    let mut engine = engine(100_000.0, 3_000.0, ProjectionConfig::default());
    let samples = engine
        .project(valuation_date(), valuation_date().add_years(2).unwrap(), Period::Months(1))
        .unwrap();

    assert_eq!(samples[0].asset_mv, 0.0);
    assert_eq!(samples[0].cash, 100_000.0);
    for sample in samples {
        assert!(sample.residual_cash.abs() < 1e-9, "{sample:?}");
    }

    // One month of accretion at 4% on the opening purchase
    assert!(samples[1].asset_mv > 100_000.0);
    assert!(samples[1].asset_mv < 101_000.0);
}

#[test]
fn dates_cover_range_at_step() {
    let start = Date::from_ymd(2024, 1, 1).unwrap();
    let end = Date::from_ymd(2026, 1, 1).unwrap();
    let step: Period = "3M".parse().unwrap();

    let mut engine = engine(10_000.0, 100.0, ProjectionConfig::default());
    let samples = engine.project(start, end, step).unwrap();

    assert_eq!(samples.len(), 8);
    assert_eq!(samples[0].date, start);
    for pair in samples.windows(2) {
        assert!(pair[0].date < pair[1].date);
        assert_eq!(pair[0].date.add_period(step).unwrap(), pair[1].date);
    }
    let last = samples[samples.len() - 1].date;
    assert!(last < end);
    assert!(last.add_period(step).unwrap() >= end);
}

#[test]
fn get_data_matches_samples() {
    let mut engine = engine(50_000.0, 2_000.0, ProjectionConfig::default());
    engine
        .project(valuation_date(), valuation_date().add_years(1).unwrap(), Period::Months(1))
        .unwrap();

    for metric in Metric::ALL {
        let series = engine.get_data(metric);
        assert_eq!(series.len(), engine.samples().len());
        for ((date, value), sample) in series.iter().zip(engine.samples()) {
            assert_eq!(*date, sample.date);
            assert_eq!(*value, sample.value(metric));
        }
    }

    let json = serde_json::to_string(engine.samples()).unwrap();
    let parsed: Vec<ProjectionSample> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), engine.samples().len());
    for (a, b) in parsed.iter().zip(engine.samples()) {
        assert_eq!(a.date, b.date);
        assert_relative_eq!(a.asset_mv, b.asset_mv, max_relative = 1e-12);
    }
}

#[test]
fn second_run_replaces_samples_and_keeps_positions() {
    let start = valuation_date();
    let end = start.add_months(6).unwrap();
    let mut engine = engine(100_000.0, 1_000.0, ProjectionConfig::default());

    let first = engine.project(start, end, Period::Months(1)).unwrap().to_vec();
    let positions = engine.assets().len();

    let second = engine.project(start, end, Period::Months(1)).unwrap().to_vec();

    assert_eq!(first.len(), second.len());
    assert_eq!(second[0].cash, first[0].cash);
    assert_eq!(first[0].asset_mv, 0.0);
    assert!(second[0].asset_mv > 0.0);
    assert!(engine.assets().len() > positions);
}

#[test]
fn sizing_methods_are_interchangeable() {
    let run = |sizing| {
        let mut engine = engine(
            100_000.0,
            3_000.0,
            ProjectionConfig::default().with_sizing(sizing),
        );
        engine
            .project(valuation_date(), valuation_date().add_years(2).unwrap(), Period::Months(1))
            .unwrap()
            .to_vec()
    };

    let calibrated = run(SizingMethod::Calibrated);
    let unit_scaled = run(SizingMethod::UnitScaled);

    assert_eq!(calibrated.len(), unit_scaled.len());
    for (a, b) in calibrated.iter().zip(&unit_scaled) {
        assert_eq!(a.date, b.date);
        assert_relative_eq!(a.asset_mv, b.asset_mv, epsilon = 1e-3, max_relative = 1e-7);
        assert_relative_eq!(a.cash, b.cash, epsilon = 1e-3, max_relative = 1e-7);
    }
}

// =============================================================================
// SHORTFALL
// =============================================================================

#[test]
fn insolvency_fails_under_fail_policy() {
    let config = ProjectionConfig::default().with_shortfall(ShortfallPolicy::Fail);
    let mut engine = engine(1_000.0, 5_000.0, config);

    let err = engine
        .project(valuation_date(), valuation_date().add_years(1).unwrap(), Period::Months(1))
        .unwrap_err();

    let EngineError::Insolvent { date, shortfall } = err else {
        panic!("expected insolvency, got {err:?}");
    };
    // First benefit falls in the window ending 2024-05-29
    assert_eq!(date, Date::from_ymd(2024, 5, 29).unwrap());
    assert!(shortfall > 3_900.0 && shortfall < 4_000.0);
    assert_eq!(engine.assets().present_value(date), 0.0);
}

#[test]
fn shortfall_carries_forward_by_default() {
    let mut engine = engine(1_000.0, 5_000.0, ProjectionConfig::default());
    let end = valuation_date().add_years(1).unwrap();
    let samples = engine
        .project(valuation_date(), end, Period::Months(1))
        .unwrap()
        .to_vec();

    // Monthly steps from Jan 31 settle on the 29th after February
    assert_eq!(samples.len(), 13);
    assert_eq!(samples[12].date, Date::from_ymd(2025, 1, 29).unwrap());

    // Three benefits paid, opening purchase sold against the first
    assert!(engine.cash() < -13_900.0 && engine.cash() > -14_000.0);

    // Once negative, cash only falls by the benefits paid
    let negative: Vec<_> = samples.iter().filter(|s| s.residual_cash < 0.0).collect();
    assert!(!negative.is_empty());
    for pair in negative.windows(2) {
        assert!(pair[1].residual_cash <= pair[0].residual_cash);
    }
}

#[test]
fn invalid_time_range_is_rejected_up_front() {
    let mut engine = engine(1_000.0, 100.0, ProjectionConfig::default());
    let start = valuation_date();

    assert!(matches!(
        engine.project(start, start, Period::Months(1)),
        Err(EngineError::InvalidTimeRange { .. })
    ));
    assert!(matches!(
        engine.project(start, start.add_years(1).unwrap(), Period::Days(0)),
        Err(EngineError::InvalidTimeRange { .. })
    ));
    assert!(engine.assets().is_empty());
    assert!(engine.samples().is_empty());
}

#[test]
fn weights_not_summing_to_one_are_rejected() {
    let curve = curve();
    let mut weights = mix(&curve);
    weights[1].weight = 0.4;

    let err = ProjectionEngine::new(
        Portfolio::new(),
        Portfolio::new(),
        1_000.0,
        weights,
        ProjectionConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidWeights { .. }));
}
