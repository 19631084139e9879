//! Electronic waveforms: shapes read straight off the phase, no filtering.
//!
//! These alias freely. The alpha shapes in particular rely on it: the gate
//! runs at an integer multiple of the base phase and hard-syncs against the
//! saw, giving the metallic timbre they are named for.

use crate::dsp::phase::{bipolar, pulse, variable_slope, variable_triangle, wrap1};

#[inline]
pub fn el_saw(x: f32) -> f32 {
    bipolar(x)
}

/// Two saws, each spanning the full bipolar range, joined at `width`.
#[inline]
pub fn el_double_saw(x: f32, width: f32) -> f32 {
    if x < width {
        bipolar(x / width)
    } else {
        bipolar((x - width) / (1.0 - width))
    }
}

#[inline]
pub fn el_tri(x: f32, width: f32) -> f32 {
    bipolar(variable_triangle(x, width))
}

/// Triangle with rounded corners: `p·sqrt(p) + (1 - p)·p`.
#[inline]
pub fn el_tri2(x: f32, width: f32) -> f32 {
    let p = variable_triangle(x, width);
    bipolar(p * p.sqrt() + (1.0 - p) * p)
}

/// Triangle with a convex rise (`sqrt`) and a sharp fall (`p³`).
#[inline]
pub fn el_tri3(x: f32, width: f32) -> f32 {
    let p = variable_triangle(x, width);
    let shaped = if x < width { p.sqrt() } else { p * p * p };
    bipolar(shaped)
}

#[inline]
pub fn el_pulse(x: f32, width: f32) -> f32 {
    bipolar(pulse(x, width))
}

#[inline]
pub fn el_slope(x: f32, width: f32) -> f32 {
    bipolar(variable_slope(x, width))
}

/// Saw stepped by a pulse: climbs -1 → 0 before `width`, 0 → 1 after.
#[inline]
pub fn el_pulse_saw(x: f32, width: f32) -> f32 {
    let ramp = variable_slope(x, width);
    let gate = pulse(x, width);
    bipolar(0.5 * (ramp + gate))
}

#[inline]
fn alpha(x: f32, width: f32, ratio: f32) -> f32 {
    let gate = pulse(wrap1(ratio * x), width);
    gate * (el_saw(x) + 1.0) - 1.0
}

/// Saw gated by a pulse running at twice the base phase.
#[inline]
pub fn el_alpha1(x: f32, width: f32) -> f32 {
    alpha(x, width, 2.0)
}

/// Saw gated by a pulse running at four times the base phase.
#[inline]
pub fn el_alpha2(x: f32, width: f32) -> f32 {
    alpha(x, width, 4.0)
}
