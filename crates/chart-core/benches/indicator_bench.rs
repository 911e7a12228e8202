use chart_core::series::{Frequency, PricePoint, PriceSeries};
use chart_core::{compute_all, IndicatorSpec};
use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, black_box, BenchmarkId, Criterion};

fn gen_daily(n: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let mut price = 100.0f64;
    let points = (0..n)
        .map(|i| {
            price += ((i as f64) * 0.13).sin();
            PricePoint::from_close(start + Duration::days(i as i64), price)
        })
        .collect();
    PriceSeries::new("BENCH", Frequency::Daily, points).unwrap()
}

fn bench_indicators(c: &mut Criterion) {
    let specs = [
        IndicatorSpec::sma(50).unwrap(),
        IndicatorSpec::bollinger(20, 2.0).unwrap(),
        IndicatorSpec::rsi(14).unwrap(),
    ];
    let mut group = c.benchmark_group("indicators");
    for &n in &[252usize, 1_260usize, 10_000usize] {
        let daily = gen_daily(n);
        for spec in &specs {
            group.bench_with_input(BenchmarkId::new(spec.kind().label(), n), &daily, |b, d| {
                b.iter(|| black_box(compute_all(std::slice::from_ref(spec), d, None)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_indicators);
criterion_main!(benches);
