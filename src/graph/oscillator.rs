use crate::config::EvalConfig;
use crate::dsp::phase::{modulate, wrap1};
use crate::dsp::virtual_analog::moog_saw;
use crate::error::{DomainError, GeneratorResult};
use crate::graph::node::{GraphNode, RenderCtx};
use crate::synth::registry::{Evaluator, Waveform};
use crate::synth::voice::VoiceState;

/*
Block Oscillator
================

The generators in the registry take a phase and return one sample. Turning
that into audio needs a phase accumulator:

  phase[n + 1] = wrap1(phase[n] + frequency / sample_rate)

OscNode keeps that accumulator together with everything else that has to
survive from one block to the next:

  - the voice state, so virtual-analog filters carry their history across
    block boundaries (rendering 2 x 64 samples equals rendering 128)
  - width and tone, validated once when set instead of once per sample
  - an optional seed, so noise renders the same way every time

Phase Modulation
----------------

render_modulated() offsets the lookup phase by `amount * input[n]` without
touching the accumulator, so modulation never drifts the pitch:

  y[n] = generator(wrap1(phase[n] + amount * input[n]))

Example usage:
  let mut osc = OscNode::new(Waveform::PdRes2);
  osc.set_width(0.3)?;
  osc.render_block(&mut buffer, &RenderCtx::from_freq(48_000.0, 110.0));
*/

pub struct OscNode {
    waveform: Waveform,
    evaluator: Evaluator,
    voice: VoiceState,
    /// Current phase in [0, 1)
    phase: f32,
    /// Phase restored by reset()
    start: f32,
    width: f32,
    tone: f32,
}

impl OscNode {
    pub const DEFAULT_WIDTH: f32 = 0.5;

    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            evaluator: Evaluator::default(),
            voice: VoiceState::new(),
            phase: 0.0,
            start: 0.0,
            width: Self::DEFAULT_WIDTH,
            tone: waveform.family().default_tone(),
        }
    }

    /// Validate width and tone against `config` instead of the defaults.
    ///
    /// The width and tone already set are checked again under the new config.
    pub fn with_config(mut self, config: EvalConfig) -> GeneratorResult<Self> {
        self.evaluator = Evaluator::new(config)?;
        self.width = self.evaluator.check_width(self.waveform, self.width)?;
        self.tone = self.evaluator.check_tone(self.waveform, self.tone)?;
        Ok(self)
    }

    /// Draw noise from a generator seeded with `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.voice = VoiceState::with_seed(seed);
        self
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn tone(&self) -> f32 {
        self.tone
    }

    /// Set the shape width. Generators that ignore width accept any value.
    pub fn set_width(&mut self, width: f32) -> Result<(), DomainError> {
        self.width = self.evaluator.check_width(self.waveform, width)?;
        Ok(())
    }

    pub fn set_tone(&mut self, tone: f32) -> Result<(), DomainError> {
        self.tone = self.evaluator.check_tone(self.waveform, tone)?;
        Ok(())
    }

    /// Set the phase the oscillator restarts from. Takes effect on reset().
    pub fn set_start(&mut self, start: f32) {
        self.start = wrap1(start);
    }

    /// Hard sync: jump back to the start phase, keeping filter history.
    pub fn sync(&mut self) {
        self.phase = self.start;
    }

    /// Render with the lookup phase offset by `amount * input[n]`.
    ///
    /// Samples past the end of `input` are rendered unmodulated.
    pub fn render_modulated(&mut self, out: &mut [f32], ctx: &RenderCtx, input: &[f32], amount: f32) {
        let inc = ctx.phase_increment();
        for (i, sample) in out.iter_mut().enumerate() {
            let offset = input.get(i).copied().unwrap_or(0.0);
            let x = modulate(self.phase, amount, offset);
            *sample = self.sample_at(x, ctx.frequency);
            self.phase = wrap1(self.phase + inc);
        }
    }

    fn sample_at(&mut self, x: f32, frequency: f32) -> f32 {
        match self.waveform {
            Waveform::VaMoogSaw => moog_saw(x, frequency),
            waveform => waveform
                .sample(x, self.width, self.tone, Some(&mut self.voice))
                .unwrap_or(0.0),
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let inc = ctx.phase_increment();
        for sample in out.iter_mut() {
            *sample = self.sample_at(self.phase, ctx.frequency);
            self.phase = wrap1(self.phase + inc);
        }
    }

    fn reset(&mut self) {
        self.phase = self.start;
        self.voice.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidthPolicy;
    use crate::dsp::electronic::el_pulse;
    use crate::error::{GeneratorError, Quantity};

    const SR: f32 = 48_000.0;

    #[test]
    fn test_phase_accumulates() {
        // eight samples per cycle, exact in f32
        let ctx = RenderCtx::from_freq(SR, SR / 8.0);
        let mut osc = OscNode::new(Waveform::ElSaw);
        let mut buffer = [0.0f32; 16];
        osc.render_block(&mut buffer, &ctx);

        for (n, &y) in buffer.iter().enumerate() {
            let expected = 2.0 * (n % 8) as f32 / 8.0 - 1.0;
            assert_eq!(y, expected, "sample {n}");
        }
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn test_negative_frequency_stays_in_range() {
        let ctx = RenderCtx::from_freq(SR, -440.0);
        let mut osc = OscNode::new(Waveform::ElSaw);
        let mut buffer = [0.0f32; 256];
        osc.render_block(&mut buffer, &ctx);
        assert!((0.0..1.0).contains(&osc.phase()));
        assert!(buffer.iter().all(|y| (-1.0..=1.0).contains(y)));
    }

    #[test]
    fn test_blocks_continue_filter_state() {
        let ctx = RenderCtx::from_freq(SR, 220.0);
        let mut whole = OscNode::new(Waveform::VaPulse);
        let mut split = OscNode::new(Waveform::VaPulse);

        let mut a = [0.0f32; 128];
        whole.render_block(&mut a, &ctx);

        let mut b = [0.0f32; 128];
        let (first, second) = b.split_at_mut(64);
        split.render_block(first, &ctx);
        split.render_block(second, &ctx);

        assert_eq!(a, b);
    }

    #[test]
    fn test_reset_restarts_from_start_phase() {
        let ctx = RenderCtx::from_freq(SR, 1000.0);
        let mut osc = OscNode::new(Waveform::VaSaw);
        osc.set_start(0.25);

        let mut first = [0.0f32; 32];
        osc.render_block(&mut first, &ctx);

        osc.reset();
        assert_eq!(osc.phase(), 0.25);

        let mut second = [0.0f32; 32];
        osc.render_block(&mut second, &ctx);
        assert_eq!(second[0], OscNode::new(Waveform::VaSaw).tap_at(0.25));
        assert_ne!(first, second);
    }

    #[test]
    fn test_sync_keeps_filter_history() {
        let ctx = RenderCtx::from_freq(SR, 1000.0);
        let mut osc = OscNode::new(Waveform::VaTri);
        let mut first = [0.0f32; 48];
        osc.render_block(&mut first, &ctx);

        osc.sync();
        assert_eq!(osc.phase(), 0.0);
        let mut second = [0.0f32; 48];
        osc.render_block(&mut second, &ctx);
        assert_ne!(first[0], second[0]);

        osc.reset();
        let mut third = [0.0f32; 48];
        osc.render_block(&mut third, &ctx);
        assert_eq!(first, third);
    }

    #[test]
    fn test_set_width_validates() {
        let mut osc = OscNode::new(Waveform::ElPulse);
        let err = osc.set_width(1.0).unwrap_err();
        assert_eq!(err.quantity, Quantity::Width);
        assert_eq!(osc.width(), OscNode::DEFAULT_WIDTH);

        let mut clamped =
            OscNode::new(Waveform::ElPulse).with_config(EvalConfig::default().with_width_policy(WidthPolicy::clamp()))
                .unwrap();
        clamped.set_width(1.0).unwrap();
        assert_eq!(clamped.width(), 1.0 - WidthPolicy::DEFAULT_EPSILON);

        // el_saw has no width, so anything goes
        assert!(OscNode::new(Waveform::ElSaw).set_width(7.0).is_ok());
    }

    #[test]
    fn test_width_reaches_generator() {
        let ctx = RenderCtx::from_freq(SR, SR / 8.0);
        let mut osc = OscNode::new(Waveform::ElPulse);
        osc.set_width(0.25).unwrap();
        let mut buffer = [0.0f32; 8];
        osc.render_block(&mut buffer, &ctx);
        for (n, &y) in buffer.iter().enumerate() {
            assert_eq!(y, el_pulse(n as f32 / 8.0, 0.25));
        }
    }

    #[test]
    fn test_set_tone_validates() {
        let mut osc = OscNode::new(Waveform::AsSaw);
        assert!(osc.set_tone(-1.0).is_err());
        assert!(osc.set_tone(1e6).is_err());
        osc.set_tone(0.5).unwrap();
        assert_eq!(osc.tone(), 0.5);
    }

    #[test]
    fn test_with_config_rechecks_stored_values() {
        // additive default tone is 1.0
        let low_ceiling = EvalConfig::default().with_max_tone(0.5);
        let err = OscNode::new(Waveform::AsSaw).with_config(low_ceiling).err();
        assert!(matches!(
            err,
            Some(GeneratorError::Domain(DomainError { quantity: Quantity::Tone, .. }))
        ));

        let mut osc = OscNode::new(Waveform::AsSaw);
        osc.set_tone(0.25).unwrap();
        let osc = osc.with_config(low_ceiling).unwrap();
        assert_eq!(osc.tone(), 0.25);

        let bad = EvalConfig::default().with_width_policy(WidthPolicy::Clamp { epsilon: 0.6 });
        assert!(matches!(
            OscNode::new(Waveform::ElPulse).with_config(bad).err(),
            Some(GeneratorError::Config(_))
        ));
    }

    #[test]
    fn test_moog_tracks_render_frequency() {
        let mut low = OscNode::new(Waveform::VaMoogSaw);
        let mut high = OscNode::new(Waveform::VaMoogSaw);
        let mut a = [0.0f32; 1];
        let mut b = [0.0f32; 1];
        low.render_block(&mut a, &RenderCtx::from_freq(SR, 55.0));
        high.render_block(&mut b, &RenderCtx::from_freq(SR, 880.0));
        assert_eq!(a[0], moog_saw(0.0, 55.0));
        assert_eq!(b[0], moog_saw(0.0, 880.0));
    }

    #[test]
    fn test_zero_modulation_matches_plain_render() {
        let ctx = RenderCtx::from_freq(SR, 330.0);
        let mut plain = OscNode::new(Waveform::PdRes1);
        let mut modulated = OscNode::new(Waveform::PdRes1);
        let input = [0.8f32; 64];

        let mut a = [0.0f32; 64];
        let mut b = [0.0f32; 64];
        plain.render_block(&mut a, &ctx);
        modulated.render_modulated(&mut b, &ctx, &input, 0.0);
        assert_eq!(a, b);
        assert_eq!(plain.phase(), modulated.phase());
    }

    #[test]
    fn test_modulation_offsets_lookup_only() {
        let ctx = RenderCtx::from_freq(SR, SR / 8.0);
        let mut osc = OscNode::new(Waveform::ElSaw);
        let mut buffer = [0.0f32; 4];
        // shorter input: the tail renders unmodulated
        osc.render_modulated(&mut buffer, &ctx, &[1.0, 1.0], 0.25);

        assert_eq!(buffer, [-0.5, -0.25, -0.5, -0.25]);
        assert_eq!(osc.phase(), 0.5);
    }

    #[test]
    fn test_seeded_noise_repeats() {
        let ctx = RenderCtx::from_freq(SR, 440.0);
        let mut a = OscNode::new(Waveform::NoWhite).with_seed(42);
        let mut b = OscNode::new(Waveform::NoWhite).with_seed(42);
        let mut x = [0.0f32; 64];
        let mut y = [0.0f32; 64];
        a.render_block(&mut x, &ctx);
        b.render_block(&mut y, &ctx);
        assert_eq!(x, y);
        assert!(x.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_boxed_node() {
        let mut node: Box<dyn GraphNode> = Box::new(OscNode::new(Waveform::PsSin));
        let mut buffer = [0.0f32; 32];
        node.render_block(&mut buffer, &RenderCtx::from_freq(SR, 440.0));
        node.reset();
        assert!(buffer.iter().all(|y| y.is_finite()));
    }

    impl OscNode {
        /// First sample a fresh node would render at phase `x`.
        fn tap_at(mut self, x: f32) -> f32 {
            self.sample_at(x, 0.0)
        }
    }
}
