use std::fmt;

use thiserror::Error;

/// Which input (or the output) a [`DomainError`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Phase,
    Width,
    Tone,
    Output,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Phase => "phase",
            Self::Width => "width",
            Self::Tone => "tone",
            Self::Output => "output",
        })
    }
}

/// A value outside the range a generator is defined on.
///
/// Width exactly 0 or 1 is the common case: several generators divide by
/// `width` or `1 - width`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{generator}: {quantity} = {value} is outside {expected}")]
pub struct DomainError {
    pub generator: &'static str,
    pub quantity: Quantity,
    pub value: f32,
    /// Human readable description of the valid range
    pub expected: &'static str,
}

/// An [`EvalConfig`](crate::EvalConfig) that cannot be evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("clamp epsilon = {0} is outside (0, 0.5)")]
    Epsilon(f32),
    #[error("max_tone = {0} must be finite and non-negative")]
    MaxTone(f32),
}

/// Error returned by waveform evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    /// A parameter (or the computed sample) is out of range
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// No generator is registered under this name
    #[error("unknown generator `{0}`")]
    UnknownGenerator(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The generator keeps per-voice filter state and none was supplied
    #[error("generator `{0}` needs a voice state")]
    MissingState(&'static str),
}

/// Result of evaluating a generator
pub type GeneratorResult<T = f32> = Result<T, GeneratorError>;
