use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::dsp::filter::CorrectiveHighpass;

/// Which virtual-analog filter a voice slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogShape {
    Saw,
    Tri,
    Pulse,
}

/// Mutable state owned by one oscillator voice
///
/// Create one when a voice starts and drop it when the voice ends. Each
/// virtual-analog shape has its own highpass so they never share `prev`.
/// A seeded voice also owns the generator its noise is drawn from.
#[derive(Debug, Clone, Default)]
pub struct VoiceState {
    saw: CorrectiveHighpass,
    tri: CorrectiveHighpass,
    pulse: CorrectiveHighpass,
    rng: Option<Pcg32>,
}

impl VoiceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A voice whose noise is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Some(Pcg32::seed_from_u64(seed)),
            ..Self::default()
        }
    }

    pub fn filter(&self, shape: AnalogShape) -> &CorrectiveHighpass {
        match shape {
            AnalogShape::Saw => &self.saw,
            AnalogShape::Tri => &self.tri,
            AnalogShape::Pulse => &self.pulse,
        }
    }

    pub fn filter_mut(&mut self, shape: AnalogShape) -> &mut CorrectiveHighpass {
        match shape {
            AnalogShape::Saw => &mut self.saw,
            AnalogShape::Tri => &mut self.tri,
            AnalogShape::Pulse => &mut self.pulse,
        }
    }

    pub fn rng_mut(&mut self) -> Option<&mut Pcg32> {
        self.rng.as_mut()
    }

    pub fn is_seeded(&self) -> bool {
        self.rng.is_some()
    }

    /// Clear the filters. The noise generator keeps its position.
    pub fn reset(&mut self) {
        self.saw.reset();
        self.tri.reset();
        self.pulse.reset();
    }
}
