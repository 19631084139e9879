#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do with a width at or beyond the (0, 1) boundary.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthPolicy {
    /// Return a domain error.
    Reject,
    /// Clamp into `[epsilon, 1 - epsilon]`. `epsilon` must sit in (0, 0.5).
    Clamp { epsilon: f32 },
}

impl WidthPolicy {
    pub const DEFAULT_EPSILON: f32 = 1e-4;

    pub fn clamp() -> Self {
        Self::Clamp {
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}

/// What to do with a phase outside [0, 1).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhasePolicy {
    /// Pass the phase through untouched; the caller wraps.
    AsGiven,
    /// Wrap into [0, 1) before evaluating.
    Wrap,
}

/// Evaluation settings shared by the evaluator and the block oscillator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalConfig {
    pub width_policy: WidthPolicy,
    pub phase_policy: PhasePolicy,
    /// Upper bound on tone. Additive cost is linear in tone, so this caps
    /// the harmonic count at `40 * max_tone`.
    pub max_tone: f32,
}

impl EvalConfig {
    pub const DEFAULT_MAX_TONE: f32 = 100.0;

    pub fn with_width_policy(mut self, policy: WidthPolicy) -> Self {
        self.width_policy = policy;
        self
    }

    pub fn with_phase_policy(mut self, policy: PhasePolicy) -> Self {
        self.phase_policy = policy;
        self
    }

    pub fn with_max_tone(mut self, max_tone: f32) -> Self {
        self.max_tone = max_tone;
        self
    }

    /// Check the values a deserialized or hand-built config may get wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let WidthPolicy::Clamp { epsilon } = self.width_policy {
            if !(epsilon > 0.0 && epsilon < 0.5) {
                return Err(ConfigError::Epsilon(epsilon));
            }
        }
        if !(self.max_tone.is_finite() && self.max_tone >= 0.0) {
            return Err(ConfigError::MaxTone(self.max_tone));
        }
        Ok(())
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            width_policy: WidthPolicy::Reject,
            phase_policy: PhasePolicy::AsGiven,
            max_tone: Self::DEFAULT_MAX_TONE,
        }
    }
}
