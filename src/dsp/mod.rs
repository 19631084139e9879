//! Waveform primitives, grouped by synthesis family.
//!
//! Every function here maps a phase in [0, 1) and its shape parameters to one
//! raw sample. None of them allocate or validate; the registry checks width
//! and tone once before calling in. The virtual-analog functions are the only
//! ones that touch state, and they borrow it from the caller.

/// Additive (Fourier series) waveforms.
pub mod additive;
/// Directly shaped, unfiltered waveforms.
pub mod electronic;
/// One-pole corrective highpass used by the virtual-analog family.
pub mod filter;
/// White noise.
pub mod noise;
/// Phase mapping, wrapping and shaping primitives.
pub mod phase;
/// Casio CZ style phase distortion.
pub mod phase_distortion;
/// Highpass-corrected analog approximations.
pub mod virtual_analog;

pub use filter::CorrectiveHighpass;
