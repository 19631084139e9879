//! Benchmarks for OscNode block rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use phaseform::{GraphNode, OscNode, RenderCtx, Waveform};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("oscillator");
    let ctx = RenderCtx::from_freq(48_000.0, 440.0);

    // One representative per family
    let waveforms = [
        // Highpass per sample
        Waveform::VaSaw,
        // Phase warp + cosine
        Waveform::PdRes2,
        // Two branches, no transcendental
        Waveform::ElPulse,
        // 40 partials at tone 1.0
        Waveform::AsSquare,
        // Seeded PCG
        Waveform::NoWhite,
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for waveform in waveforms {
            let mut osc = OscNode::new(waveform).with_seed(7);
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| {
                    osc.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        let modulator: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut osc = OscNode::new(Waveform::PsSin);
        group.bench_with_input(BenchmarkId::new("ps_sin_modulated", size), &size, |b, _| {
            b.iter(|| {
                osc.render_modulated(black_box(&mut buffer), black_box(&ctx), &modulator, 0.3);
            })
        });
    }

    group.finish();
}
