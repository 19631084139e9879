//! Block rendering on top of the generator registry.
//!
//! A graph node owns whatever state a generator needs between samples (phase,
//! voice filters, a seeded noise source) and fills caller-provided buffers.

/// Core trait shared by all graph nodes.
pub mod node;
/// Phase-accumulating oscillator over any registered generator.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
pub use oscillator::OscNode;
