use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gios_air::{summarize, LatLon, Station, StationLocator};

fn hourly_series(hours: usize) -> Vec<(String, Option<f64>)> {
    (0..hours)
        .map(|h| {
            let timestamp = format!(
                "2024-{:02}-{:02} {:02}:00:00",
                1 + h / 720 % 12,
                1 + h / 24 % 28,
                h % 24
            );
            // Every seventh hour missing, as with station outages.
            let value = (h % 7 != 0).then(|| 20.0 + (h as f64 * 0.37).sin() * 15.0);
            (timestamp, value)
        })
        .collect()
}

fn grid_stations(n: usize) -> Vec<Station> {
    (0..n)
        .map(|i| Station {
            id: i as i64,
            station_name: format!("Station {i}"),
            gegr_lat: 49.0 + (i % 50) as f64 * 0.1,
            gegr_lon: 14.1 + (i / 50) as f64 * 0.1,
            city: None,
            address_street: None,
        })
        .collect()
}

fn bench_summary(c: &mut Criterion) {
    let year = hourly_series(24 * 365);
    c.bench_function("summarize_year_hourly", |b| {
        b.iter(|| summarize(black_box(&year)))
    });

    let locator = StationLocator::new(grid_stations(2_500));
    c.bench_function("within_radius_25km", |b| {
        b.iter(|| locator.within_radius(black_box(LatLon(52.23, 21.01)), black_box(25.0)))
    });
}

criterion_group!(benches, bench_summary);
criterion_main!(benches);
