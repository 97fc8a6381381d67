//! Core data structures for partial-order mining.

mod activity;
mod concurrency;
mod graph;

pub use activity::*;
pub use concurrency::*;
pub use graph::*;
