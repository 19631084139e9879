pub mod config; // Evaluation policies
pub mod dsp; // Waveform primitives by family
pub mod error;
pub mod graph; // Block rendering
pub mod synth; // Generator registry and voice state

pub use config::{EvalConfig, PhasePolicy, WidthPolicy};
pub use error::{ConfigError, DomainError, GeneratorError, GeneratorResult, Quantity};
pub use graph::{GraphNode, OscNode, RenderCtx};
pub use synth::registry::{evaluate, list_generators, Evaluator, Family, Param, Waveform};
pub use synth::voice::{AnalogShape, VoiceState};

/// Largest block the command-line tool renders in one call.
pub const MAX_BLOCK_SIZE: usize = 2048;
