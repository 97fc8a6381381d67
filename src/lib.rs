//! # polog — partially ordered event logs
//!
//! Infers which pairs of activities in a business-process event log are
//! concurrent and uses that inference to rewrite purely sequential traces
//! into partially ordered traces, deduplicated by graph isomorphism.
//!
//! The crate provides:
//!
//! - **Concurrency relations**: symmetric sets of concurrent-pair facts,
//!   including self-concurrency
//! - **Alpha oracle**: concurrency from bidirectional direct succession
//! - **Lifecycle oracle**: concurrency from overlapping start/complete
//!   intervals
//! - **Partial-order construction**: total order + concurrency relation
//!   to a minimal DAG (covering relation)
//! - **Shape deduplication**: stable integer ids per isomorphism class
//!
//! Log I/O, variant extraction, and report file writing are host concerns:
//! the core receives already-extracted sequences of activity labels and
//! returns successor maps, shape ids, and an in-memory report.
//!
//! ## Quick start
//!
//! ```
//! use polog::prelude::*;
//!
//! let sequences = vec![
//!     vec!["A".to_string(), "B".to_string(), "C".to_string()],
//!     vec!["A".to_string(), "C".to_string(), "B".to_string()],
//! ];
//!
//! let pipeline = Pipeline::new(PipelineConfig::alpha(Scope::LogWide)).unwrap();
//! let outcome = pipeline.run(&sequences).unwrap();
//!
//! // B and C occur in both orders, so they collapse onto one shape.
//! assert_eq!(outcome.traces[0].shape_id, outcome.traces[1].shape_id);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod error;
pub mod models;
pub mod oracle;
pub mod order;
pub mod pipeline;
pub mod report;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{PartialOrderCatalog, ShapeId};
    pub use crate::error::{PologError, Result};
    pub use crate::models::{
        ActivityLabel, ConcurrencyRelation, EquivalenceMap, PartialOrderGraph, Position, Sequence,
        SuccessorMap,
    };
    pub use crate::oracle::{
        find_alpha_concurrency, LifecycleConfig, LifecycleFindings, LifecycleOracle,
    };
    pub use crate::order::{build_by_name, build_by_position, OrderedTrace};
    pub use crate::pipeline::{Mode, Pipeline, PipelineConfig, RunOutcome, Scope, TraceOutcome};
    pub use crate::report::{ConcurrencyReport, ReportRow};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
