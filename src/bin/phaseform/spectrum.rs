//! Harmonic analysis of a single rendered cycle
//!
//! The input is exactly one period, so every harmonic lands on its own FFT
//! bin and no window is needed.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Level reported for a harmonic with no energy
const FLOOR_DB: f32 = -120.0;

pub struct Harmonic {
    pub number: usize,
    /// Peak amplitude of this partial
    pub amplitude: f32,
    pub db: f32,
}

pub struct HarmonicAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl HarmonicAnalyzer {
    /// `cycle_len` is the number of samples in one period.
    pub fn new(cycle_len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(cycle_len);
        let scratch = vec![Complex::new(0.0, 0.0); cycle_len];
        Self { fft, scratch }
    }

    /// Amplitudes of harmonics `1..=count`, stopping at Nyquist.
    pub fn analyze(&mut self, cycle: &[f32], count: usize) -> Vec<Harmonic> {
        let len = self.scratch.len();
        for (bin, sample) in self.scratch.iter_mut().zip(cycle) {
            *bin = Complex::new(*sample, 0.0);
        }

        self.fft.process(&mut self.scratch);

        let half = len / 2;
        (1..=count.min(half.saturating_sub(1)))
            .map(|number| {
                let amplitude = 2.0 * self.scratch[number].norm() / len as f32;
                let db = if amplitude > 0.0 {
                    (20.0 * amplitude.log10()).max(FLOOR_DB)
                } else {
                    FLOOR_DB
                };
                Harmonic {
                    number,
                    amplitude,
                    db,
                }
            })
            .collect()
    }
}
