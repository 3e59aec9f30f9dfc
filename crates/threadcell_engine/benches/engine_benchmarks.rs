//! Benchmarks for the threadcell engine.
//!
//! Run with: `cargo bench --package threadcell_engine`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use threadcell_engine::{Bootstrap, CapturedOutput, EngineConfig, Machine};

fn booted() -> Machine {
    let mut m = Machine::new(EngineConfig::quiet());
    m.set_output(CapturedOutput::new());
    Bootstrap::new().install(&mut m).expect("bootstrap");
    m
}

fn bench_bootstrap(c: &mut Criterion) {
    c.bench_function("bootstrap_kernel", |b| {
        b.iter(|| black_box(booted()));
    });
}

fn bench_outer_interpreter(c: &mut Criterion) {
    let mut group = c.benchmark_group("outer_interpreter");

    for count in [10, 100, 1000] {
        let source = "7 ".repeat(count);
        group.bench_with_input(BenchmarkId::new("numbers", count), &source, |b, source| {
            b.iter(|| {
                let mut m = booted();
                black_box(m.run_source(source))
            });
        });
    }

    group.finish();
}

fn bench_threaded_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("threaded_calls");

    let mut m = booted();
    m.run_source(": A ; : B A A A A ; : C B B B B ; : D C C C C ;")
        .expect("definitions");
    let image = m.snapshot();

    group.bench_function("nested_depth_4", |b| {
        b.iter(|| {
            m.restore(&image).expect("restore");
            black_box(m.run_source("D D D D"))
        });
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let m = booted();
    c.bench_function("snapshot", |b| b.iter(|| black_box(m.snapshot())));
}

criterion_group!(
    benches,
    bench_bootstrap,
    bench_outer_interpreter,
    bench_threaded_calls,
    bench_snapshot
);
criterion_main!(benches);
