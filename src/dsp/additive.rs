//! Additive synthesis: truncated Fourier series.
//!
//! `tone` sets how many harmonics are summed, `N = floor(40 · tone)`, so
//! tone 1.0 gives 40 partials. Cost grows linearly with it. Partials are
//! always accumulated from the fundamental upwards; floating-point addition
//! is not associative and reordering would change the output bits.
//!
//! Nothing here is normalized after the fact. A truncated square overshoots
//! near its edges (Gibbs) and `as_impulse` grows with N, so outputs leave
//! [-1, 1] and that is kept.

use std::f32::consts::{FRAC_2_PI, PI};

use crate::dsp::phase::sin2;

/// Partials summed per unit of tone.
pub const HARMONICS_PER_TONE: f32 = 40.0;

/// Gain applied to the unweighted impulse sum.
pub const IMPULSE_GAIN: f32 = 0.05;

/// Highest harmonic index for `tone`. Negative or NaN tone gives 0.
#[inline]
pub fn harmonic_count(tone: f32) -> usize {
    (HARMONICS_PER_TONE * tone).floor() as usize
}

/// `-2/π · Σ sin(2πix) / i`, all harmonics.
pub fn as_saw(x: f32, tone: f32) -> f32 {
    let mut sum = 0.0;
    for i in 1..=harmonic_count(tone) {
        let n = i as f32;
        sum += sin2(n * x) / n;
    }
    -FRAC_2_PI * sum
}

/// `4/π · Σ sin(2πix) / i`, odd harmonics.
pub fn as_square(x: f32, tone: f32) -> f32 {
    let mut sum = 0.0;
    for i in (1..=harmonic_count(tone)).step_by(2) {
        let n = i as f32;
        sum += sin2(n * x) / n;
    }
    4.0 / PI * sum
}

/// `0.05 · Σ sin(2πix)`, no rolloff.
pub fn as_impulse(x: f32, tone: f32) -> f32 {
    let mut sum = 0.0;
    for i in 1..=harmonic_count(tone) {
        sum += sin2(i as f32 * x);
    }
    IMPULSE_GAIN * sum
}

/// `8/π² · Σ (-1)^((i-1)/2) sin(2πix) / i²`, odd harmonics.
pub fn as_triangle(x: f32, tone: f32) -> f32 {
    let mut sum = 0.0;
    for i in (1..=harmonic_count(tone)).step_by(2) {
        let n = i as f32;
        let sign = if (i / 2) % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign * sin2(n * x) / (n * n);
    }
    8.0 / (PI * PI) * sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonic_count_truncates() {
        assert_eq!(harmonic_count(0.0), 0);
        assert_eq!(harmonic_count(0.02), 0);
        assert_eq!(harmonic_count(0.1), 4);
        assert_eq!(harmonic_count(1.0), 40);
        assert_eq!(harmonic_count(-1.0), 0);
        assert_eq!(harmonic_count(f32::NAN), 0);
    }

    #[test]
    fn test_zero_tone_is_silent() {
        for i in 0..16 {
            let x = i as f32 / 16.0;
            assert_eq!(as_saw(x, 0.0), 0.0);
            assert_eq!(as_square(x, 0.0), 0.0);
            assert_eq!(as_impulse(x, 0.0), 0.0);
            assert_eq!(as_triangle(x, 0.0), 0.0);
        }
    }

    #[test]
    fn test_square_partial_sum_at_quarter() {
        // N = 4: harmonics 1 and 3
        let expected = 4.0 / PI * ((PI / 2.0).sin() + (3.0 * PI / 2.0).sin() / 3.0);
        let actual = as_square(0.25, 0.1);
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_saw_converges_to_ramp() {
        // 200 partials
        let y = as_saw(0.25, 5.0);
        assert!((y + 0.5).abs() < 0.01, "expected about -0.5, got {y}");
    }

    #[test]
    fn test_triangle_peaks_at_quarter() {
        let y = as_triangle(0.25, 5.0);
        assert!((y - 1.0).abs() < 0.01, "expected about 1.0, got {y}");
    }

    #[test]
    fn test_square_overshoots_unclipped() {
        let peak = (1..200)
            .map(|i| as_square(i as f32 / 2000.0, 1.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0, "expected Gibbs overshoot, peak was {peak}");
    }

    #[test]
    fn test_impulse_grows_with_tone() {
        let quiet = as_impulse(0.01, 0.25).abs();
        let loud = as_impulse(0.01, 1.0).abs();
        assert!(loud > quiet);
    }
}
