//! Concurrency oracles: derive concurrent-pair facts from sequences.

mod alpha;
mod lifecycle;

pub use alpha::*;
pub use lifecycle::*;
