use criterion::{Criterion, black_box, criterion_group, criterion_main};
use utsava_base::{GeoLocation, MeanMotionEphemeris};
use utsava_festival::{FestivalOptions, RuleBook, compute_festivals, resolve_rules};
use utsava_series::{PanchangaConfig, build_series};

const RULES_JSON: &str = include_str!("../data/festival_rules.json");
const RELATIVE_JSON: &str = include_str!("../data/relative_festival_rules.json");

fn festival_benches(c: &mut Criterion) {
    let cfg = PanchangaConfig::new(
        GeoLocation::new(13.08, 80.27, 0.0),
        5.5,
        "2024-01-01".parse().unwrap(),
        "2024-03-31".parse().unwrap(),
    );
    let eph = MeanMotionEphemeris::new(cfg.location, cfg.ayanamsha).unwrap();
    let series = build_series(&eph, &cfg).unwrap();

    let mut book = RuleBook::from_json(RULES_JSON).unwrap();
    book.extend_relative_json(RELATIVE_JSON).unwrap();
    let options = FestivalOptions::default();

    let mut group = c.benchmark_group("festival");
    group.sample_size(20);
    group.bench_function("resolve_rules_quarter", |b| {
        b.iter(|| resolve_rules(black_box(&series), book.rules()))
    });
    group.bench_function("compute_festivals_quarter", |b| {
        b.iter(|| compute_festivals(black_box(&series), &book, &options))
    });
    group.finish();
}

criterion_group!(benches, festival_benches);
criterion_main!(benches);
