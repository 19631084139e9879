//! Per-sample cost of every generator through `Evaluator`.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use phaseform::{Evaluator, VoiceState, Waveform};

pub fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    let evaluator = Evaluator::default();

    for &waveform in Waveform::ALL {
        let mut voice = VoiceState::with_seed(1);
        let mut phase = 0.0f32;
        group.bench_function(BenchmarkId::from_parameter(waveform.name()), |b| {
            b.iter(|| {
                phase = (phase + 0.0091) % 1.0;
                evaluator.evaluate_waveform(
                    black_box(waveform),
                    black_box(phase),
                    black_box(0.3),
                    black_box(0.25),
                    Some(&mut voice),
                )
            })
        });
    }

    // Additive cost grows with tone
    for tone in [0.1f32, 1.0, 10.0] {
        group.bench_with_input(BenchmarkId::new("as_saw_tone", tone), &tone, |b, &tone| {
            b.iter(|| evaluator.evaluate_waveform(Waveform::AsSaw, black_box(0.3), 0.5, tone, None))
        });
    }

    group.finish();
}
