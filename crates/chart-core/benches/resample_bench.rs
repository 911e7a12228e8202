use chart_core::series::{Frequency, PricePoint, PriceSeries};
use chart_core::weekly_bars;
use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, black_box, BenchmarkId, Criterion};

fn gen_ohlc(n: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let mut price = 100.0f64;
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let o = price;
        let c = o + 0.2;
        price = c;
        v.push(PricePoint::try_new(start + Duration::days(i as i64), o, c + 1.0, o - 1.0, c, 1_000).unwrap());
    }
    PriceSeries::new("BENCH", Frequency::Daily, v).unwrap()
}

fn bench_weekly(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekly_bars");
    for &n in &[1_260usize, 10_000usize, 50_000usize] {
        let daily = gen_ohlc(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &daily, |b, d| {
            b.iter(|| black_box(weekly_bars(d)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_weekly);
criterion_main!(benches);
