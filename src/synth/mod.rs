// Purpose: Generator lookup, validation and per-voice state
// This layer sits between the raw dsp primitives and anything that renders audio

pub mod registry;
pub mod voice;
