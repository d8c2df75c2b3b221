use criterion::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use lipidsol::prelude::models::*;
use lipidsol::*;

fn single_run() {
    let model = IntestinalDigestion::default();
    let times = digestion_times();
    black_box(model.simulate(
        3.86e-5,
        50.0,
        times.as_slice().unwrap(),
        &IntegratorConfig::default(),
    ))
    .unwrap();
}

fn small_sweep() {
    let model = IntestinalDigestion::default();
    let config = SweepConfig::default().with_blocksize(10);
    black_box(run_sweep(&model, &config)).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let model = IntestinalDigestion::default();
    c.bench_function("digestion_rate", |b| {
        b.iter(|| model.rate(black_box(10.0), 0.0, black_box(3.86e-5), black_box(50.0)))
    });
    c.bench_function("digestion_single_run", |b| b.iter(single_run));
    c.bench_function("digestion_sweep_10x10", |b| b.iter(small_sweep));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
