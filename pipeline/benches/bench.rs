use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pipeline::{aggregate, write_lines};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const ROWS: usize = 1_000_000;

fn synthetic_input(rows: usize) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut buf = Vec::with_capacity(rows * 20);
    for _ in 0..rows {
        let station = rng.random_range(0..10_000u32);
        let tenths = rng.random_range(-999..=999i32);
        let sign = if tenths < 0 { "-" } else { "" };
        let abs = tenths.unsigned_abs();
        buf.extend_from_slice(
            format!("station-{station};{sign}{}.{}\n", abs / 10, abs % 10).as_bytes(),
        );
    }
    buf
}

fn criterion_benchmark(c: &mut Criterion) {
    let input = synthetic_input(ROWS);

    let mut worker_counts = vec![1, 4, pipeline::default_workers()];
    worker_counts.sort_unstable();
    worker_counts.dedup();

    let mut group = c.benchmark_group("aggregate");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(input.len() as u64));

    for workers in worker_counts {
        group.bench_function(BenchmarkId::from_parameter(workers), |b| {
            b.iter(|| {
                let index = aggregate(black_box(&input), workers).unwrap();
                let mut out = Vec::with_capacity(64 * 1024);
                write_lines(&mut out, &index).unwrap();
                black_box(out);
            })
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark,
);

criterion_main!(benches);
