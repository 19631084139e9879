//! Generator registry and the validated evaluation entry point.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{EvalConfig, PhasePolicy, WidthPolicy};
use crate::dsp::phase::wrap1;
use crate::dsp::{additive, electronic, noise, phase_distortion as pd, virtual_analog as va};
use crate::error::{ConfigError, DomainError, GeneratorError, GeneratorResult, Quantity};
use crate::synth::voice::{AnalogShape, VoiceState};

/*
Registry
========

Every generator is a variant of `Waveform`. The variant carries everything a
front end needs to draw a control panel for it:

  name      stable string id ("pd_res2"), what `evaluate` looks up
  family    va / pd / el / as / no
  params    which of width and tone it reads

`Waveform::ALL` fixes the listing order. The name index is a HashMap built
the first time a name is looked up and never touched again.


Validation
----------

The primitives in `dsp` divide by width, 1 - width and friends without
checking. All checking happens here, once per call:

  phase   must be finite; optionally wrapped into [0, 1)
  width   only if the generator reads it; must sit inside (0, 1), or is
          clamped to [ε, 1 - ε] under WidthPolicy::Clamp
  tone    only if the generator reads it; finite, 0 <= tone <= max_tone
  output  a non-finite sample is reported, never returned
*/

/// Synthesis family a generator belongs to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    VirtualAnalog,
    PhaseDistortion,
    Electronic,
    Additive,
    Noise,
}

impl Family {
    /// Registry name prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::VirtualAnalog => "va",
            Self::PhaseDistortion => "pd",
            Self::Electronic => "el",
            Self::Additive => "as",
            Self::Noise => "no",
        }
    }

    /// A tone that sounds reasonable for this family: a low highpass corner
    /// for virtual analog, 40 partials for additive.
    pub const fn default_tone(self) -> f32 {
        match self {
            Self::VirtualAnalog => 0.001,
            Self::Additive => 1.0,
            _ => 0.0,
        }
    }
}

/// Shape parameter a generator reads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Width,
    Tone,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Width => "width",
            Self::Tone => "tone",
        })
    }
}

macro_rules! waveforms {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal, $family:ident, [$($param:ident),*]; )*) => {
        /// Every registered generator.
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Waveform {
            $( $(#[$doc])* $variant, )*
        }

        impl Waveform {
            /// All generators in listing order.
            pub const ALL: &'static [Waveform] = &[$(Waveform::$variant),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Waveform::$variant => $name,)*
                }
            }

            pub const fn family(self) -> Family {
                match self {
                    $(Waveform::$variant => Family::$family,)*
                }
            }

            /// Shape parameters this generator reads.
            pub const fn params(self) -> &'static [Param] {
                match self {
                    $(Waveform::$variant => &[$(Param::$param),*],)*
                }
            }
        }
    };
}

waveforms! {
    VaSaw => "va_saw", VirtualAnalog, [Tone];
    VaTri => "va_tri", VirtualAnalog, [Width, Tone];
    VaPulse => "va_pulse", VirtualAnalog, [Width, Tone];
    /// Moog saw model at the 44 Hz reference frequency.
    VaMoogSaw => "va_moog_saw", VirtualAnalog, [];

    PdSaw => "pd_saw", PhaseDistortion, [Width];
    PdSquare => "pd_square", PhaseDistortion, [Width];
    PdPulse => "pd_pulse", PhaseDistortion, [Width];
    PdDoubleSine => "pd_double_sine", PhaseDistortion, [Width];
    PdSawPulse => "pd_saw_pulse", PhaseDistortion, [Width];
    PdRes1 => "pd_res1", PhaseDistortion, [Width];
    PdRes2 => "pd_res2", PhaseDistortion, [Width];
    PdRes3 => "pd_res3", PhaseDistortion, [Width];
    PdSinHalf => "pd_sin_half", PhaseDistortion, [Width];
    PsSin => "ps_sin", PhaseDistortion, [Width];
    PsSinSaw => "ps_sin_saw", PhaseDistortion, [Width];
    PsSinFm => "ps_sin_fm", PhaseDistortion, [Width];
    PsHardsync => "ps_hardsync", PhaseDistortion, [Width];
    PsSoftsync => "ps_softsync", PhaseDistortion, [Width];
    PsJp8000Tri => "ps_jp8000_tri", PhaseDistortion, [Width];
    PsWaveslices => "ps_waveslices", PhaseDistortion, [Width];
    PsSinusoids => "ps_sinusoids", PhaseDistortion, [Width];
    PsSupersaw => "ps_supersaw", PhaseDistortion, [Width];
    PsRipple => "ps_ripple", PhaseDistortion, [Width];
    PsVtri => "ps_vtri", PhaseDistortion, [Width];

    ElSaw => "el_saw", Electronic, [];
    ElDoubleSaw => "el_double_saw", Electronic, [Width];
    ElTri => "el_tri", Electronic, [Width];
    ElTri2 => "el_tri2", Electronic, [Width];
    ElTri3 => "el_tri3", Electronic, [Width];
    ElPulse => "el_pulse", Electronic, [Width];
    ElSlope => "el_slope", Electronic, [Width];
    ElPulseSaw => "el_pulse_saw", Electronic, [Width];
    ElAlpha1 => "el_alpha1", Electronic, [Width];
    ElAlpha2 => "el_alpha2", Electronic, [Width];

    AsSaw => "as_saw", Additive, [Tone];
    AsSquare => "as_square", Additive, [Tone];
    AsImpulse => "as_impulse", Additive, [Tone];
    AsTriangle => "as_triangle", Additive, [Tone];

    NoWhite => "no_white", Noise, [];
}

impl Waveform {
    /// The filter slot a stateful generator uses, `None` for stateless ones.
    pub const fn analog_shape(self) -> Option<AnalogShape> {
        match self {
            Self::VaSaw => Some(AnalogShape::Saw),
            Self::VaTri => Some(AnalogShape::Tri),
            Self::VaPulse => Some(AnalogShape::Pulse),
            _ => None,
        }
    }

    /// Whether evaluation needs a [`VoiceState`].
    pub const fn is_stateful(self) -> bool {
        self.analog_shape().is_some()
    }

    pub fn reads(self, param: Param) -> bool {
        self.params().contains(&param)
    }

    /// Compute one sample with no validation.
    ///
    /// Returns `None` only when a stateful generator is called without a voice.
    /// Noise draws from the voice's seeded generator when it has one.
    pub fn sample(self, x: f32, width: f32, tone: f32, voice: Option<&mut VoiceState>) -> Option<f32> {
        let y = match self {
            Self::VaSaw => va::va_saw(voice?.filter_mut(AnalogShape::Saw), x, tone),
            Self::VaTri => va::va_tri(voice?.filter_mut(AnalogShape::Tri), x, width, tone),
            Self::VaPulse => va::va_pulse(voice?.filter_mut(AnalogShape::Pulse), x, width, tone),
            Self::VaMoogSaw => va::moog_saw(x, va::MOOG_REFERENCE_FREQ),

            Self::PdSaw => pd::pd_saw(x, width),
            Self::PdSquare => pd::pd_square(x, width),
            Self::PdPulse => pd::pd_pulse(x, width),
            Self::PdDoubleSine => pd::pd_double_sine(x, width),
            Self::PdSawPulse => pd::pd_saw_pulse(x, width),
            Self::PdRes1 => pd::pd_res1(x, width),
            Self::PdRes2 => pd::pd_res2(x, width),
            Self::PdRes3 => pd::pd_res3(x, width),
            Self::PdSinHalf => pd::pd_sin_half(x, width),
            Self::PsSin => pd::ps_sin(x, width),
            Self::PsSinSaw => pd::ps_sin_saw(x, width),
            Self::PsSinFm => pd::ps_sin_fm(x, width),
            Self::PsHardsync => pd::ps_hardsync(x, width),
            Self::PsSoftsync => pd::ps_softsync(x, width),
            Self::PsJp8000Tri => pd::ps_jp8000_tri(x, width),
            Self::PsWaveslices => pd::ps_waveslices(x, width),
            Self::PsSinusoids => pd::ps_sinusoids(x, width),
            Self::PsSupersaw => pd::ps_supersaw(x, width),
            Self::PsRipple => pd::ps_ripple(x, width),
            Self::PsVtri => pd::ps_vtri(x, width),

            Self::ElSaw => electronic::el_saw(x),
            Self::ElDoubleSaw => electronic::el_double_saw(x, width),
            Self::ElTri => electronic::el_tri(x, width),
            Self::ElTri2 => electronic::el_tri2(x, width),
            Self::ElTri3 => electronic::el_tri3(x, width),
            Self::ElPulse => electronic::el_pulse(x, width),
            Self::ElSlope => electronic::el_slope(x, width),
            Self::ElPulseSaw => electronic::el_pulse_saw(x, width),
            Self::ElAlpha1 => electronic::el_alpha1(x, width),
            Self::ElAlpha2 => electronic::el_alpha2(x, width),

            Self::AsSaw => additive::as_saw(x, tone),
            Self::AsSquare => additive::as_square(x, tone),
            Self::AsImpulse => additive::as_impulse(x, tone),
            Self::AsTriangle => additive::as_triangle(x, tone),

            Self::NoWhite => match voice.and_then(VoiceState::rng_mut) {
                Some(rng) => noise::white(rng),
                None => noise::no_white(),
            },
        };
        Some(y)
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn name_index() -> &'static HashMap<&'static str, Waveform> {
    static INDEX: OnceLock<HashMap<&'static str, Waveform>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let index: HashMap<_, _> = Waveform::ALL.iter().map(|w| (w.name(), *w)).collect();
        tracing::debug!(generators = index.len(), "built generator name index");
        index
    })
}

impl FromStr for Waveform {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        name_index()
            .get(s)
            .copied()
            .ok_or_else(|| GeneratorError::UnknownGenerator(s.to_owned()))
    }
}

/// `(name, parameters)` for every generator, in registry order.
pub fn list_generators() -> impl Iterator<Item = (&'static str, &'static [Param])> {
    Waveform::ALL.iter().map(|w| (w.name(), w.params()))
}

/// Phase, width and tone after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub phase: f32,
    pub width: f32,
    pub tone: f32,
}

/// Validates inputs against an [`EvalConfig`] and evaluates generators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Fails if `config` would let a generator divide by zero or panic.
    pub fn new(config: EvalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(?config, "configured evaluator");
        Ok(Self { config })
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Look up `name` and evaluate it.
    pub fn evaluate(
        &self,
        name: &str,
        phase: f32,
        width: f32,
        tone: f32,
        voice: Option<&mut VoiceState>,
    ) -> GeneratorResult {
        let waveform = name.parse::<Waveform>()?;
        self.evaluate_waveform(waveform, phase, width, tone, voice)
    }

    pub fn evaluate_waveform(
        &self,
        waveform: Waveform,
        phase: f32,
        width: f32,
        tone: f32,
        voice: Option<&mut VoiceState>,
    ) -> GeneratorResult {
        let shape = self.validate(waveform, phase, width, tone)?;
        let y = waveform
            .sample(shape.phase, shape.width, shape.tone, voice)
            .ok_or(GeneratorError::MissingState(waveform.name()))?;
        if !y.is_finite() {
            return Err(reject(waveform, Quantity::Output, y, "finite values").into());
        }
        Ok(y)
    }

    /// Check phase and the parameters `waveform` reads; return them normalized.
    pub fn validate(
        &self,
        waveform: Waveform,
        phase: f32,
        width: f32,
        tone: f32,
    ) -> Result<Shape, DomainError> {
        if !phase.is_finite() {
            return Err(reject(waveform, Quantity::Phase, phase, "finite values"));
        }
        let phase = match self.config.phase_policy {
            PhasePolicy::AsGiven => phase,
            PhasePolicy::Wrap => wrap1(phase),
        };
        let width = if waveform.reads(Param::Width) {
            self.check_width(waveform, width)?
        } else {
            width
        };
        let tone = if waveform.reads(Param::Tone) {
            self.check_tone(waveform, tone)?
        } else {
            tone
        };
        Ok(Shape { phase, width, tone })
    }

    /// Apply the width policy.
    pub fn check_width(&self, waveform: Waveform, width: f32) -> Result<f32, DomainError> {
        if !width.is_finite() {
            return Err(reject(waveform, Quantity::Width, width, "(0, 1)"));
        }
        match self.config.width_policy {
            WidthPolicy::Reject if width <= 0.0 || width >= 1.0 => {
                Err(reject(waveform, Quantity::Width, width, "(0, 1)"))
            }
            WidthPolicy::Reject => Ok(width),
            WidthPolicy::Clamp { epsilon } => Ok(width.clamp(epsilon, 1.0 - epsilon)),
        }
    }

    pub fn check_tone(&self, waveform: Waveform, tone: f32) -> Result<f32, DomainError> {
        if tone.is_finite() && (0.0..=self.config.max_tone).contains(&tone) {
            Ok(tone)
        } else {
            Err(reject(waveform, Quantity::Tone, tone, "[0, max_tone]"))
        }
    }
}

fn reject(waveform: Waveform, quantity: Quantity, value: f32, expected: &'static str) -> DomainError {
    tracing::trace!(generator = waveform.name(), %quantity, value, "rejected");
    DomainError {
        generator: waveform.name(),
        quantity,
        value,
        expected,
    }
}

/// Evaluate a generator by name with the default [`EvalConfig`].
///
/// ```
/// use phaseform::{evaluate, GeneratorError, VoiceState};
///
/// let y = evaluate("el_saw", 0.5, 0.5, 0.0, None).unwrap();
/// assert_eq!(y, 0.0);
///
/// let mut voice = VoiceState::new();
/// assert!(evaluate("va_saw", 0.1, 0.5, 0.01, Some(&mut voice)).is_ok());
/// assert_eq!(
///     evaluate("va_saw", 0.1, 0.5, 0.01, None),
///     Err(GeneratorError::MissingState("va_saw"))
/// );
/// ```
pub fn evaluate(
    name: &str,
    phase: f32,
    width: f32,
    tone: f32,
    voice: Option<&mut VoiceState>,
) -> GeneratorResult {
    Evaluator::default().evaluate(name, phase, width, tone, voice)
}
