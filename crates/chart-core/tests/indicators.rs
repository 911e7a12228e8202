// File: crates/chart-core/tests/indicators.rs
// Purpose: Indicator engine arithmetic, edge policies and parameter validation.

use chart_core::indicator::{rolling_mean, rsi};
use chart_core::{
    compute, compute_all, ConfigError, Frequency, IndicatorKind, IndicatorOutput, IndicatorRequest, IndicatorSpec,
    PricePoint, PriceSeries, Timestamp,
};
use chrono::{Duration, NaiveDate};

fn day(i: usize) -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap() + Duration::days(i as i64)
}

fn series(closes: &[f64]) -> PriceSeries {
    let points = closes.iter().enumerate().map(|(i, &c)| PricePoint::from_close(day(i), c)).collect();
    PriceSeries::new("TEST", Frequency::Daily, points).expect("ascending series")
}

fn line(output: IndicatorOutput) -> Vec<Option<f64>> {
    match output {
        IndicatorOutput::Line(s) => s.values(),
        other => panic!("expected a line, got {other:?}"),
    }
}

fn wavy(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + 10.0 * (i as f64 * 0.37).sin() + (i % 7) as f64).collect()
}

#[test]
fn sma_leading_values_undefined_then_window_mean() {
    let closes: Vec<f64> = (1..=10).map(|v| v as f64).collect();
    let out = line(compute(&IndicatorSpec::sma(3).unwrap(), &series(&closes)));
    assert_eq!(out.len(), 10);
    assert!(out[..2].iter().all(Option::is_none));
    assert_eq!(out[2], Some(2.0));
    assert_eq!(out[9], Some(9.0));
}

#[test]
fn sma_matches_direct_mean_on_irregular_data() {
    let closes = wavy(120);
    let n = 20;
    let out = line(compute(&IndicatorSpec::sma(n as i64).unwrap(), &series(&closes)));
    for (i, v) in out.iter().enumerate() {
        if i + 1 < n {
            assert!(v.is_none(), "index {i} should be undefined");
        } else {
            let want = closes[i + 1 - n..=i].iter().sum::<f64>() / n as f64;
            assert!((v.unwrap() - want).abs() < 1e-9, "index {i}");
        }
    }
}

#[test]
fn sma_window_longer_than_series_is_all_undefined() {
    let out = line(compute(&IndicatorSpec::sma(50).unwrap(), &series(&[1.0, 2.0, 3.0, 4.0, 5.0])));
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn flat_series_sma_and_bands_collapse() {
    let s = series(&[100.0; 60]);

    let sma = line(compute(&IndicatorSpec::sma(50).unwrap(), &s));
    assert!(sma[..49].iter().all(Option::is_none));
    assert!(sma[49..].iter().all(|v| *v == Some(100.0)));

    match compute(&IndicatorSpec::bollinger(20, 2.0).unwrap(), &s) {
        IndicatorOutput::Band { upper, middle, lower } => {
            assert_eq!(upper.first_defined_index(), Some(19));
            for i in 19..60 {
                assert_eq!(upper.value_at(i), Some(100.0));
                assert_eq!(middle.value_at(i), Some(100.0));
                assert_eq!(lower.value_at(i), Some(100.0));
            }
        }
        other => panic!("expected band, got {other:?}"),
    }
}

#[test]
fn bollinger_uses_population_deviation() {
    match compute(&IndicatorSpec::bollinger(3, 2.0).unwrap(), &series(&[1.0, 2.0, 3.0])) {
        IndicatorOutput::Band { upper, middle, lower } => {
            let sigma = (2.0f64 / 3.0).sqrt();
            assert_eq!(middle.value_at(2), Some(2.0));
            assert!((upper.value_at(2).unwrap() - (2.0 + 2.0 * sigma)).abs() < 1e-12);
            assert!((lower.value_at(2).unwrap() - (2.0 - 2.0 * sigma)).abs() < 1e-12);
            assert_eq!(upper.value_at(1), None);
        }
        other => panic!("expected band, got {other:?}"),
    }
}

#[test]
fn bollinger_bands_are_ordered() {
    let s = series(&wavy(200));
    match compute(&IndicatorSpec::bollinger(20, 2.0).unwrap(), &s) {
        IndicatorOutput::Band { upper, middle, lower } => {
            for i in 0..s.len() {
                match (upper.value_at(i), middle.value_at(i), lower.value_at(i)) {
                    (Some(u), Some(m), Some(l)) => assert!(u >= m && m >= l, "index {i}: {u} {m} {l}"),
                    (None, None, None) => assert!(i < 19),
                    mixed => panic!("bands disagree at {i}: {mixed:?}"),
                }
            }
        }
        other => panic!("expected band, got {other:?}"),
    }
}

#[test]
fn rsi_saturates_to_100_on_strictly_rising_closes() {
    let closes: Vec<f64> = (0..20).map(|i| 50.0 + i as f64).collect();
    let out = rsi(&closes, 14);
    assert!(out[..14].iter().all(Option::is_none));
    assert!(out[14..].iter().all(|v| *v == Some(100.0)));
}

#[test]
fn rsi_is_zero_on_strictly_falling_closes() {
    let closes: Vec<f64> = (0..20).map(|i| 50.0 - i as f64).collect();
    let out = rsi(&closes, 14);
    assert!(out[14..].iter().all(|v| *v == Some(0.0)));
}

#[test]
fn rsi_balanced_moves_give_fifty() {
    let out = rsi(&[10.0, 11.0, 10.0, 11.0, 10.0], 2);
    assert_eq!(out[..2], [None, None]);
    assert!(out[2..].iter().all(|v| (v.unwrap() - 50.0).abs() < 1e-12));
}

#[test]
fn rsi_stays_within_bounds() {
    let s = series(&wavy(300));
    match compute(&IndicatorSpec::rsi(14).unwrap(), &s) {
        IndicatorOutput::Oscillator { values, upper_bound, lower_bound } => {
            assert_eq!(values.first_defined_index(), Some(14));
            assert!(values.defined().all(|(_, v)| (0.0..=100.0).contains(&v)));
            assert_eq!((upper_bound, lower_bound), (70.0, 30.0));
        }
        other => panic!("expected oscillator, got {other:?}"),
    }
}

#[test]
fn rsi_on_a_flat_window_saturates_to_100() {
    assert_eq!(rsi(&[5.0; 4], 2), vec![None, None, Some(100.0), Some(100.0)]);
}

#[test]
fn rsi_with_exactly_window_points_is_undefined() {
    let out = rsi(&[1.0, 2.0, 3.0], 3);
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn weekly_mean_is_an_unweighted_rolling_mean() {
    let closes = [1.0, 2.0, 3.0, 10.0];
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PricePoint::from_close(day(i * 7), c))
        .collect();
    let weekly = PriceSeries::new("TEST", Frequency::Weekly, points).unwrap();
    let out = compute(&IndicatorSpec::weekly_rolling_mean(2).unwrap(), &weekly);
    match out {
        IndicatorOutput::Line(s) => {
            assert_eq!(s.frequency, Frequency::Weekly);
            assert_eq!(s.values(), vec![None, Some(1.5), Some(2.5), Some(6.5)]);
        }
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn same_spec_twice_gives_identical_output() {
    let s = series(&wavy(90));
    for spec in [
        IndicatorSpec::sma(10).unwrap(),
        IndicatorSpec::weekly_rolling_mean(4).unwrap(),
        IndicatorSpec::bollinger(20, 2.0).unwrap(),
        IndicatorSpec::rsi(14).unwrap(),
    ] {
        assert_eq!(compute(&spec, &s), compute(&spec, &s));
    }
}

#[test]
fn empty_input_gives_empty_output_for_every_spec() {
    let empty = PriceSeries::empty("NONE", Frequency::Daily);
    let specs = [
        IndicatorSpec::sma(50).unwrap(),
        IndicatorSpec::weekly_rolling_mean(200).unwrap(),
        IndicatorSpec::bollinger(20, 2.0).unwrap(),
        IndicatorSpec::rsi(14).unwrap(),
    ];
    let computed = compute_all(&specs, &empty, None);
    assert_eq!(computed.len(), 4);
    for c in &computed {
        assert!(c.output.series().iter().all(|s| s.is_empty()), "{:?}", c.spec);
    }
}

#[test]
fn rolling_mean_with_zero_window_is_undefined() {
    assert_eq!(rolling_mean(&[1.0, 2.0], 0), vec![None, None]);
}

#[test]
fn invalid_parameters_are_rejected_with_named_errors() {
    assert_eq!(IndicatorSpec::rsi(0), Err(ConfigError::InvalidWindow { kind: "RSI", window: 0 }));
    assert_eq!(IndicatorSpec::sma(-5), Err(ConfigError::InvalidWindow { kind: "SMA", window: -5 }));
    assert!(matches!(IndicatorSpec::bollinger(20, 0.0), Err(ConfigError::InvalidMultiplier { .. })));
    assert!(matches!(IndicatorSpec::bollinger(20, -1.0), Err(ConfigError::InvalidMultiplier { .. })));
    assert!(matches!(IndicatorSpec::bollinger(20, f64::NAN), Err(ConfigError::InvalidMultiplier { .. })));
    assert!(matches!(IndicatorSpec::weekly_rolling_mean(0), Err(ConfigError::InvalidWindow { .. })));
}

#[test]
fn requests_fill_in_conventional_defaults() {
    let rsi = IndicatorRequest::new(IndicatorKind::Rsi).validate().unwrap();
    assert_eq!(rsi.window(), 14);
    let weekly = IndicatorRequest::new(IndicatorKind::WeeklyRollingMean).validate().unwrap();
    assert_eq!(weekly.window(), 200);
    match IndicatorRequest::new(IndicatorKind::BollingerBands).validate().unwrap() {
        IndicatorSpec::BollingerBands(b) => assert_eq!((b.window(), b.multiplier()), (20, 2.0)),
        other => panic!("unexpected {other:?}"),
    }
    assert!(IndicatorRequest::new(IndicatorKind::Rsi).window(0).validate().is_err());
}

#[test]
fn series_constructor_rejects_unordered_bars() {
    let points = vec![PricePoint::from_close(day(1), 1.0), PricePoint::from_close(day(1), 2.0)];
    assert!(PriceSeries::new("DUP", Frequency::Daily, points.clone()).is_err());
    let normalized = PriceSeries::normalized("DUP", Frequency::Daily, points);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized.last().unwrap().close, 2.0);
}

#[test]
fn price_point_enforces_ohlc_invariants() {
    assert!(PricePoint::try_new(day(0), 10.0, 12.0, 9.0, 11.0, 100).is_ok());
    assert!(PricePoint::try_new(day(0), 10.0, 10.5, 9.0, 11.0, 100).is_err());
    assert!(PricePoint::try_new(day(0), 10.0, 12.0, 10.5, 11.0, 100).is_err());
    assert!(PricePoint::try_new(day(0), f64::NAN, 12.0, 9.0, 11.0, 100).is_err());
}
