//! Criterion benchmarks for the streaming simplifier.
//! Focus sizes: n in {1k, 10k}; widths {16, unbounded}.
//! Results live under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use dots::lssd::TrajectoryBuffer;
use dots::synth::{random_walk, ReplayToken, WalkCfg};
use dots::{DotsCfg, Simplifier};

fn walk(n: usize, seed: u64) -> Vec<dots::Point> {
    random_walk(
        WalkCfg {
            points: n,
            ..WalkCfg::default()
        },
        ReplayToken::new(seed, 0),
    )
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    for &n in &[1_000usize, 10_000] {
        for &(label, width) in &[("w16", 16usize), ("unbounded", 1_000_000)] {
            let cfg = DotsCfg::new(2_000.0, 2.0, width);
            group.bench_with_input(BenchmarkId::new(format!("feed_read_{label}"), n), &n, |b, &n| {
                b.iter_batched(
                    || walk(n, 42),
                    |pts| {
                        let mut s = Simplifier::new(cfg).unwrap();
                        let mut kept = 0usize;
                        for p in &pts {
                            s.feed_point(*p).unwrap();
                            while s.read_output().is_some() {
                                kept += 1;
                            }
                        }
                        s.finish();
                        while s.read_output().is_some() {
                            kept += 1;
                        }
                        kept
                    },
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_lssd(c: &mut Criterion) {
    let mut group = c.benchmark_group("lssd");
    let buf = TrajectoryBuffer::from_points(&walk(10_000, 7));
    for &span in &[2usize, 100, 9_999] {
        group.bench_with_input(BenchmarkId::new("closed_form", span), &span, |b, &span| {
            b.iter(|| buf.lssd(0, span).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stream, bench_lssd);
criterion_main!(benches);
