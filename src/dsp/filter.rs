use std::f32::consts::TAU;

/*
Corrective Highpass
===================

A naive saw, triangle or pulse built straight from the phase is not centred
on zero: a pulse at 25% width spends three quarters of its cycle at +1. The
virtual-analog generators run their raw shape through a one-pole recursive
highpass that pulls the DC offset out and flattens the low-frequency droop,
which is what the capacitor-coupled output of an analog oscillator does.

| symbol | meaning                                      |
| ------ | -------------------------------------------- |
| x      | raw input sample                             |
| f      | tone, cutoff as a fraction of the sample rate |
| c2     | feedback coefficient derived from f          |
| prev   | previous filtered output minus its input     |
| y      | filtered output                              |

    b    = 2 - cos(2πf)
    c2   = b - sqrt(b² - 1)
    y    = c2 · (prev + x)
    prev = y - x

For every finite f, b >= 1, so the square root is always real and
0 < c2 <= 1. f = 0 (or any integer) gives c2 = 1 and the filter passes its
input plus a constant. Larger f in (0, 0.5] lowers c2 and raises the cutoff.

A constant input settles at y = 0 with prev = -1: DC is removed entirely.
*/

/// Feedback coefficient for the corrective highpass at `tone` cycles per sample.
#[inline]
pub fn highpass_coefficient(tone: f32) -> f32 {
    let b = 2.0 - (TAU * tone).cos();
    b - (b * b - 1.0).sqrt()
}

/// One-pole corrective highpass. The whole state is the single `prev` scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorrectiveHighpass {
    prev: f32,
}

impl CorrectiveHighpass {
    pub fn new() -> Self {
        Self { prev: 0.0 }
    }

    /// Run one sample through the filter with a precomputed coefficient.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, c2: f32) -> f32 {
        let y = c2 * (self.prev + sample);
        self.prev = y - sample;
        y
    }

    /// Run one sample through the filter at `tone`.
    #[inline]
    pub fn process(&mut self, sample: f32, tone: f32) -> f32 {
        self.next_sample(sample, highpass_coefficient(tone))
    }

    /// Filter a buffer in place.
    pub fn render(&mut self, buffer: &mut [f32], tone: f32) {
        let c2 = highpass_coefficient(tone);
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, c2);
        }
    }

    pub fn prev(&self) -> f32 {
        self.prev
    }

    pub fn reset(&mut self) {
        self.prev = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficient_range() {
        for &tone in &[0.0, 0.001, 0.05, 0.2, 0.5, 3.7] {
            let c2 = highpass_coefficient(tone);
            assert!(c2 > 0.0 && c2 <= 1.0, "tone {tone} gave c2 {c2}");
        }
        assert!((highpass_coefficient(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_constant_input_converges_to_fixed_point() {
        let tone = 0.2;
        let c2 = highpass_coefficient(tone);
        let mut filter = CorrectiveHighpass::new();

        let mut y = 0.0;
        for _ in 0..64 {
            y = filter.process(1.0, tone);
        }

        // fixed point: y = c2 (prev + 1), prev = y - 1  =>  y = 0, prev = -1
        assert!(y.abs() < 1e-5, "expected y -> 0, got {y}");
        assert!((filter.prev() + 1.0).abs() < 1e-5, "expected prev -> -1, got {}", filter.prev());
        assert!((y - c2 * (filter.prev() + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_passes_nyquist_at_low_tone() {
        let mut filter = CorrectiveHighpass::new();
        let mut buffer: Vec<f32> = (0..256).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

        filter.render(&mut buffer, 0.01);

        let peak = buffer[128..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak > 0.9, "expected Nyquist to pass, got peak {peak}");
    }

    #[test]
    fn test_render_matches_per_sample_processing() {
        let input: Vec<f32> = (0..32).map(|i| (i as f32 * 0.37).sin()).collect();

        let mut block = input.clone();
        CorrectiveHighpass::new().render(&mut block, 0.1);

        let mut filter = CorrectiveHighpass::new();
        for (x, expected) in input.iter().zip(&block) {
            let y = filter.process(*x, 0.1);
            assert!((y - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = CorrectiveHighpass::new();
        filter.process(1.0, 0.2);
        assert!(filter.prev() != 0.0);

        filter.reset();
        assert_eq!(filter, CorrectiveHighpass::default());
    }
}
