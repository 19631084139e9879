//! Benchmarks grouped by layer.

mod filter;
mod generators;
mod oscillator;

pub use filter::bench_filter;
pub use generators::bench_generators;
pub use oscillator::bench_oscillator;
