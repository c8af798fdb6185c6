use cfradial_check::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn bench_check_file(c: &mut Criterion) {
    let options = CheckOptions { verbose: true };

    c.bench_function("check_file", |b| {
        b.iter(|| {
            CfRadialCore::check_file(
                black_box(&fixture_path("compliant_fixed.cdl")),
                black_box(options.clone()),
            )
        });
    });
}

fn bench_check_dataset(c: &mut Criterion) {
    let path = fixture_path("compliant_fixed.cdl");
    let dataset = cfradial_check::load_dataset(&path).expect("fixture should load");

    c.bench_function("check_cfradial_compliance", |b| {
        b.iter(|| cfradial_check::check_cfradial_compliance(black_box(&dataset), black_box(true)));
    });
}

fn bench_parse_cdl(c: &mut Criterion) {
    let text = std::fs::read_to_string(fixture_path("compliant_fixed.cdl"))
        .expect("fixture should be readable");

    c.bench_function("parse_cdl", |b| {
        b.iter(|| cfradial_check::dataset::parse_cdl(black_box(&text)));
    });
}

criterion_group!(benches, bench_check_file, bench_check_dataset, bench_parse_cdl);
criterion_main!(benches);
