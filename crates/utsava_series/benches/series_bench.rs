use criterion::{Criterion, black_box, criterion_group, criterion_main};
use utsava_base::{AngamKind, GeoLocation, MeanMotionEphemeris};
use utsava_series::{Kaala, PanchangaConfig, build_series, kaala_angams};

fn series_benches(c: &mut Criterion) {
    let cfg = PanchangaConfig::new(
        GeoLocation::new(13.08, 80.27, 0.0),
        5.5,
        "2024-01-01".parse().unwrap(),
        "2024-01-31".parse().unwrap(),
    );
    let eph = MeanMotionEphemeris::new(cfg.location, cfg.ayanamsha).unwrap();

    let mut group = c.benchmark_group("series");
    group.sample_size(10);
    group.bench_function("build_one_month", |b| b.iter(|| build_series(&eph, black_box(&cfg))));

    let series = build_series(&eph, &cfg).unwrap();
    group.bench_function("kaala_angams_aparaahna", |b| {
        b.iter(|| {
            for d in series.requested() {
                let _ = kaala_angams(&series, black_box(d), AngamKind::Tithi, Kaala::Aparaahna);
            }
        })
    });
    group.finish();
}

criterion_group!(benches, series_benches);
criterion_main!(benches);
