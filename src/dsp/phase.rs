//! Phase shaping primitives shared by every generator family.

use std::f32::consts::TAU;

/*
Phase Shaping
=============

Every generator in this crate is a function of one normalized phase value.
Instead of building a waveform from scratch, we bend the phase first and then
read a simple carrier (a ramp, a pulse, a cosine) with the bent phase.

Vocabulary
----------

  phase       Position within one cycle, 0.0 (start) to 1.0 (end, exclusive).
              The caller advances it; nothing in here keeps time.

  unipolar    A value in 0.0 to 1.0. Phase is unipolar.

  bipolar     A value in -1.0 to +1.0. Audio samples are bipolar.

                 unipolar   bipolar
                 0.0        -1.0
                 0.5         0.0
                 1.0        +1.0

  width       Breakpoint inside the cycle where a shape changes segment
              (duty cycle of a pulse, peak of a triangle).

  wrap        Folding any real number back into 0.0 to 1.0.


Building Blocks
---------------

    ramp            ╱╱╱╱     slope·x + offset, wrapped
    triangle        ╲╱╲╱     |2x - 1|
    pulse           ▁▁▔▔     0 before width, 1 after
    variable slope  ╱╱       two ramps joined at width
    variable tri    ╱╲       rise until width, fall after

The primitives never guard against width = 0 or width = 1. Validation happens
once at the evaluation entry point (see `synth::registry`).


Negative Phase
--------------

Remainder operators disagree on negative input: C's fmod(-0.25, 1) is -0.25,
a Euclidean remainder is 0.75. `wrap1` always answers in [0, 1), so a phase
pushed below zero by modulation lands at the end of the previous cycle.
*/

/// Map a unipolar value (0.0 to 1.0) to bipolar (-1.0 to +1.0).
///
/// ```
/// use phaseform::dsp::phase::bipolar;
/// assert_eq!(bipolar(0.0), -1.0);
/// assert_eq!(bipolar(0.5), 0.0);
/// ```
#[inline]
pub fn bipolar(x: f32) -> f32 {
    2.0 * x - 1.0
}

/// Map a bipolar value (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn unipolar(x: f32) -> f32 {
    0.5 * x + 0.5
}

/// Wrap `x` into `[0, 1)`, regardless of its sign.
///
/// ```
/// use phaseform::dsp::phase::wrap1;
/// assert!((wrap1(1.25) - 0.25).abs() < 1e-6);
/// assert!((wrap1(-0.25) - 0.75).abs() < 1e-6);
/// ```
#[inline]
pub fn wrap1(x: f32) -> f32 {
    let r = x.rem_euclid(1.0);
    // tiny negative inputs round up to exactly 1.0
    if r >= 1.0 {
        0.0
    } else {
        r
    }
}

/// Alias of [`wrap1`].
#[inline]
pub fn mod1(x: f32) -> f32 {
    wrap1(x)
}

/// Wrap `x` into `[0, |m|)`.
#[inline]
pub fn wrap(x: f32, m: f32) -> f32 {
    let r = x.rem_euclid(m);
    if r >= m.abs() {
        0.0
    } else {
        r
    }
}

/// `slope * x + offset`
#[inline]
pub fn linear(x: f32, slope: f32, offset: f32) -> f32 {
    slope * x + offset
}

/// Linear map wrapped into one cycle. With `slope > 1` this is a hard-synced ramp.
#[inline]
pub fn ramp(x: f32, slope: f32, offset: f32) -> f32 {
    wrap1(linear(x, slope, offset))
}

/// `|2x - 1|`: falls from 1 to 0 over the first half cycle, rises back over the second.
#[inline]
pub fn triangle_unsigned(x: f32) -> f32 {
    bipolar(x).abs()
}

/// [`triangle_unsigned`] scaled, offset and wrapped (soft-sync building block).
#[inline]
pub fn triangle_ramp(x: f32, slope: f32, offset: f32) -> f32 {
    wrap1(linear(triangle_unsigned(x), slope, offset))
}

/// Rises 0 → 1 over the first half, falls 1 → 0 over the second.
#[inline]
pub fn symmetric_triangle(x: f32) -> f32 {
    if x < 0.5 {
        2.0 * x
    } else {
        2.0 - 2.0 * x
    }
}

/// Hard step at `width`: 0 before, 1 from `width` on.
#[inline]
pub fn pulse(x: f32, width: f32) -> f32 {
    if x < width {
        0.0
    } else {
        1.0
    }
}

/// Two full ramps joined at `width`.
#[inline]
pub fn variable_slope(x: f32, width: f32) -> f32 {
    if x < width {
        x / width
    } else {
        (x - width) / (1.0 - width)
    }
}

/// Rises 0 → 1 until `width`, falls back to 0 at the end of the cycle.
#[inline]
pub fn variable_triangle(x: f32, width: f32) -> f32 {
    if x < width {
        x / width
    } else {
        1.0 - (x - width) / (1.0 - width)
    }
}

/// `bipolar(x) - bipolar(|x - width|)`
#[inline]
pub fn signed_variable_triangle(x: f32, width: f32) -> f32 {
    bipolar(x) - bipolar((x - width).abs())
}

/// [`signed_variable_triangle`] scaled, offset and wrapped.
#[inline]
pub fn variable_triangle_ramp(x: f32, width: f32, slope: f32, offset: f32) -> f32 {
    wrap1(linear(signed_variable_triangle(x, width), slope, offset))
}

/// Phase plus its own remainder modulo `m`: a staircase that folds the ramp.
/// The remainder follows [`wrap`], so it is never negative.
#[inline]
pub fn ripple(x: f32, m: f32) -> f32 {
    x + wrap(x, m)
}

/// Sum of two remainders, the supersaw-style ripple.
#[inline]
pub fn ripple2(x: f32, m1: f32, m2: f32) -> f32 {
    wrap(x, m1) + wrap(x, m2)
}

/// `sin(2πx)`
#[inline]
pub fn sin2(x: f32) -> f32 {
    (TAU * x).sin()
}

/// `cos(2πx)`
#[inline]
pub fn cos2(x: f32) -> f32 {
    (TAU * x).cos()
}

/// Offset `phase` by `amount * input` and wrap the result back into one cycle.
#[inline]
pub fn modulate(phase: f32, amount: f32, input: f32) -> f32 {
    wrap1(phase + amount * input)
}
