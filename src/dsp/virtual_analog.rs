//! Virtual-analog waveforms.
//!
//! The raw shapes are the same as the electronic family, but every sample is
//! passed through a [`CorrectiveHighpass`] owned by the voice. The caller hands
//! in the filter for the waveform being played; saw, triangle and pulse each
//! keep their own so switching shapes never leaks one filter's memory into
//! another.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::dsp::filter::CorrectiveHighpass;
use crate::dsp::phase::{bipolar, pulse, variable_triangle};

/// Frequency the stateless Moog saw model is evaluated at when no oscillator
/// frequency is known (single-cycle plots).
pub const MOOG_REFERENCE_FREQ: f32 = 44.0;

/// Highpassed saw.
#[inline]
pub fn va_saw(filter: &mut CorrectiveHighpass, x: f32, tone: f32) -> f32 {
    filter.process(bipolar(x), tone)
}

/// Highpassed triangle peaking at `width`.
#[inline]
pub fn va_tri(filter: &mut CorrectiveHighpass, x: f32, width: f32, tone: f32) -> f32 {
    filter.process(bipolar(variable_triangle(x, width)), tone)
}

/// Highpassed pulse with duty cycle `width`.
#[inline]
pub fn va_pulse(filter: &mut CorrectiveHighpass, x: f32, width: f32, tone: f32) -> f32 {
    filter.process(bipolar(pulse(x, width)), tone)
}

/// Phase offset curve of the Moog sawtooth model: a triangle that peaks at `p`.
#[inline]
fn moog_offset(x: f32, p: f32) -> f32 {
    let m = PI - TAU * p;
    if x < p {
        m * (x / p)
    } else {
        m * (1.0 - x) / (1.0 - p)
    }
}

/// Discrete-time model of the Moog sawtooth.
///
/// A sine whose phase is bent by a frequency-dependent triangle. At low
/// frequencies the breakpoint sits close to the end of the cycle and the
/// result is a steep-flanked saw; it smooths out as `freq` rises.
#[inline]
pub fn moog_saw(x: f32, freq: f32) -> f32 {
    let p = 0.9924 - 0.000_021_51 * freq;
    (TAU * x + moog_offset(x, p) - FRAC_PI_2).sin()
}
