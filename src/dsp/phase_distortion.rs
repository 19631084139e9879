//! Phase distortion (Casio CZ style) and phase-shaped sines.

use crate::dsp::phase::{
    bipolar, cos2, linear, ramp, ripple, ripple2, sin2, symmetric_triangle, triangle_ramp,
    variable_slope, variable_triangle_ramp,
};

/*
Phase Distortion
================

A cosine read at a constant rate is a pure tone. Read it with a bent phase
and the same carrier produces saws, squares and resonant sweeps. The CZ
synthesizers built their whole sound on this trick.

    output = cos(2π · distort(phase))

The distortion functions here are all piecewise linear:

    distort(x, bp)
    1.0 ┤                 ╱
        │              ╱
    0.5 ┤      ╱╱╱╱╱
        │    ╱
        │  ╱
    0.0 ┼╱──────┬─────────→ x
        0       bp        1

The first half of the carrier is squeezed into [0, bp), the second half is
stretched over [bp, 1). A small breakpoint gives a steep falling edge, which
is a saw once the cosine is read through it.


Resonant Variants
-----------------

The CZ "resonance" waves fake a swept resonant filter: a fast carrier whose
frequency rises with width (exp(6w), so 1x to ~400x) is amplitude-modulated
by a slow window that restarts every cycle.

    output = 1 - window(x) · (1 - cos(2π · x · e^(6w)))

    res1   window = 1 - x              (saw-shaped decay)
    res2   window = 2x, then 2(1 - x)   (triangle)
    res3   window = 1, then 2(1 - x)    (trapezoid)


Width Mapping
-------------

  pd_saw, pd_square    bp = 0.5 - 0.5w   (w → 1 sharpens the edge)
  pd_sin_half          bp = 0.5 + 0.5w
  pulse family         mod = 1 - w


Phase Shaping
-------------

The ps_* shapes chain the phase helpers instead of bending a cosine. Most of
them run the phase through a linear map `a1 · x + a0` first. Width drives the
slope, the offset is always 0:

    a1 = sync_ratio(w) = 1 + 7w      (1x .. 8x)

  ps_hardsync     bipolar(ramp(x, a1, 0))           slave saw reset every cycle
  ps_softsync     bipolar(tri(triangle_ramp(x, a1))) reversing instead of resetting
  ps_jp8000_tri   folded soft-sync triangle
  ps_waveslices   sin(2π · a1 · x)                  sine cut off at the cycle end
  ps_sinusoids    sin(2π · variable_slope(x, w))    two sines joined at w
  ps_supersaw     sin(2π · ripple2(a1 · x, ½, ⅓))
  ps_ripple       sin(2π · ripple(x, w))
  ps_vtri         bipolar(variable_triangle_ramp(x, w, 1, 0))

Width must stay inside (0, 1); the evaluator enforces it.
*/

/// Two-segment phase distortion with breakpoint `bp`.
#[inline]
pub fn distort(x: f32, bp: f32) -> f32 {
    if x < bp {
        0.5 * x / bp
    } else {
        0.5 + 0.5 * (x - bp) / (1.0 - bp)
    }
}

/// Four-segment distortion used by [`pd_square`]: ramp, hold 0.5, hold 0.5, ramp.
#[inline]
pub fn square_phase(x: f32, edge: f32) -> f32 {
    if x < edge {
        0.5 * x / edge
    } else if x < 0.5 {
        0.5
    } else if x < 1.0 - edge {
        0.5
    } else {
        0.5 + 0.5 * (x - (1.0 - edge)) / edge
    }
}

#[inline]
pub fn pd_saw(x: f32, width: f32) -> f32 {
    cos2(distort(x, 0.5 - 0.5 * width))
}

/// Cosine read through [`square_phase`]; the plateau sits at exactly -1.
#[inline]
pub fn pd_square(x: f32, width: f32) -> f32 {
    cos2(square_phase(x, 0.5 - 0.5 * width))
}

#[inline]
pub fn pd_pulse(x: f32, width: f32) -> f32 {
    let m = 1.0 - width;
    let x2 = if x < m { x / m } else { 1.0 };
    cos2(x2.max(0.0))
}

#[inline]
pub fn pd_double_sine(x: f32, width: f32) -> f32 {
    let m = 1.0 - width;
    let x2 = if x < 0.5 {
        2.0 * x
    } else {
        (1.0 - (x - 0.5) / (0.5 * m)).max(0.0)
    };
    cos2(x2)
}

#[inline]
pub fn pd_saw_pulse(x: f32, width: f32) -> f32 {
    let m = 1.0 - width;
    let x2 = if x < 0.5 {
        x
    } else {
        (0.5 - (x - 0.5) / m).max(0.0)
    };
    cos2(x2)
}

#[inline]
fn resonance(x: f32, width: f32, window: f32) -> f32 {
    let x2 = x * (6.0 * width).exp();
    1.0 - window * (1.0 - cos2(x2))
}

#[inline]
pub fn pd_res1(x: f32, width: f32) -> f32 {
    resonance(x, width, 1.0 - x)
}

#[inline]
pub fn pd_res2(x: f32, width: f32) -> f32 {
    let window = if x < 0.5 { 2.0 * x } else { 2.0 * (1.0 - x) };
    resonance(x, width, window)
}

#[inline]
pub fn pd_res3(x: f32, width: f32) -> f32 {
    let window = if x < 0.5 { 1.0 } else { 2.0 * (1.0 - x) };
    resonance(x, width, window)
}

/// Half a sine cycle read through [`distort`], mapped to bipolar.
#[inline]
pub fn pd_sin_half(x: f32, width: f32) -> f32 {
    bipolar(sin2(0.5 * distort(x, 0.5 + 0.5 * width)))
}

/// Sine read through [`distort`] with the raw width as breakpoint.
#[inline]
pub fn ps_sin(x: f32, width: f32) -> f32 {
    sin2(distort(x, width))
}

/// Like [`ps_sin`], shifted a quarter cycle so the discontinuity becomes a saw edge.
#[inline]
pub fn ps_sin_saw(x: f32, width: f32) -> f32 {
    sin2(distort(x, width) + 0.25)
}

/// Sine self-modulated by its own phase; width 0.5 is a pure sine.
#[inline]
pub fn ps_sin_fm(x: f32, width: f32) -> f32 {
    sin2(x + (width - 0.5) * sin2(x))
}

/// Largest slope added on top of 1 by [`sync_ratio`].
pub const SYNC_RATIO_RANGE: f32 = 7.0;

/// Remainder moduli for [`ps_supersaw`].
pub const SUPERSAW_MODULI: (f32, f32) = (0.5, 1.0 / 3.0);

/// Width to linear phase slope: 1 at w = 0, 8 at w = 1.
#[inline]
pub fn sync_ratio(width: f32) -> f32 {
    1.0 + SYNC_RATIO_RANGE * width
}

#[inline]
pub fn ps_hardsync(x: f32, width: f32) -> f32 {
    bipolar(ramp(x, sync_ratio(width), 0.0))
}

/// Continuous at every wrap: the slave reverses direction instead of resetting.
#[inline]
pub fn ps_softsync(x: f32, width: f32) -> f32 {
    bipolar(symmetric_triangle(triangle_ramp(x, sync_ratio(width), 0.0)))
}

#[inline]
pub fn ps_jp8000_tri(x: f32, width: f32) -> f32 {
    let p = bipolar(triangle_ramp(x, sync_ratio(width), 0.0));
    2.0 * (p - (p - 0.5).ceil())
}

#[inline]
pub fn ps_waveslices(x: f32, width: f32) -> f32 {
    sin2(linear(x, sync_ratio(width), 0.0))
}

#[inline]
pub fn ps_sinusoids(x: f32, width: f32) -> f32 {
    sin2(variable_slope(x, width))
}

#[inline]
pub fn ps_supersaw(x: f32, width: f32) -> f32 {
    let (m1, m2) = SUPERSAW_MODULI;
    sin2(ripple2(linear(x, sync_ratio(width), 0.0), m1, m2))
}

#[inline]
pub fn ps_ripple(x: f32, width: f32) -> f32 {
    sin2(ripple(x, width))
}

/// Rises until `width`, then holds at `wrap1(2w)`.
#[inline]
pub fn ps_vtri(x: f32, width: f32) -> f32 {
    bipolar(variable_triangle_ramp(x, width, 1.0, 0.0))
}
