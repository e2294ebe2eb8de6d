use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::df;
use weather_trends::{analyse, welch, TrendSeries, WeatherTable, WeatherVariable};

const YEARS: i64 = 5;

fn synthetic_weather() -> WeatherTable {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let n = (YEARS * 365) as usize;
    let days: Vec<NaiveDate> = (0..n as i64).map(|i| start + Duration::days(i)).collect();
    let seasonal: Vec<f64> = (0..n)
        .map(|i| 18.0 + 7.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.25).cos())
        .collect();
    WeatherTable::new(
        df!(
            "date" => days,
            "rain" => vec![1.2; n],
            "maxTemp" => seasonal.clone(),
            "minTemp" => seasonal.iter().map(|t| t - 9.0).collect::<Vec<_>>(),
            "maxRH" => vec![85.0; n],
            "minRH" => vec![40.0; n],
            "wind" => vec![3.5; n],
            "radiation" => seasonal.iter().map(|t| t * 0.8).collect::<Vec<_>>(),
        )
        .unwrap(),
    )
}

fn synthetic_trend() -> TrendSeries {
    // 2019-01-06 is the first Sunday of the synthetic record.
    let first = NaiveDate::from_ymd_opt(2019, 1, 6).unwrap();
    let weeks = YEARS * 52;
    let dates: Vec<NaiveDate> = (0..weeks).map(|i| first + Duration::weeks(i)).collect();
    let interest: Vec<i64> = (0..weeks).map(|i| 50 + (i * 13) % 40).collect();
    TrendSeries::new("depression", df!("date" => dates, "interest" => interest).unwrap())
}

fn bench_analysis(c: &mut Criterion) {
    let weather = synthetic_weather();
    let trend = synthetic_trend();
    c.bench_function("analyse", |b| {
        b.iter(|| analyse(black_box(&weather), black_box(&trend), WeatherVariable::Radiation, 4))
    });

    let samples: Vec<f64> = (0..520).map(|i| (i as f64 * 0.12).sin()).collect();
    c.bench_function("welch", |b| {
        b.iter(|| welch(black_box(&samples), 208, 365.0 / 7.0))
    });
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
