//! White noise.
//!
//! [`no_white`] draws from the thread-local generator and is not reproducible.
//! Anything that needs repeatable output passes its own generator to
//! [`white`]; a voice created with a seed does exactly that.

use rand::Rng;

use crate::dsp::phase::bipolar;

/// Uniform sample in [-1, 1) from the thread-local generator.
#[inline]
pub fn no_white() -> f32 {
    bipolar(rand::random::<f32>())
}

/// Uniform sample in [-1, 1) from `rng`.
#[inline]
pub fn white<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    bipolar(rng.random::<f32>())
}
