//! Benchmarks for the corrective highpass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use phaseform::dsp::CorrectiveHighpass;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i % 100) as f32 / 50.0 - 1.0).collect();
        let mut buffer = input.clone();
        let mut filter = CorrectiveHighpass::new();

        group.bench_with_input(BenchmarkId::new("corrective_highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(0.01));
            })
        });
    }

    group.finish();
}
