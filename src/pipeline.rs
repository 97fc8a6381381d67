//! Mode × scope orchestration over a set of distinct sequences.
//!
//! Four pipelines, selected by detection mode (alpha or lifecycle) and
//! detection scope (log-wide or trace-wise). Log-wide scope accumulates one
//! shared relation across all sequences in a pre-run; trace-wise scope keeps
//! every sequence's relation private. Single-threaded and deterministic:
//! "concurrency" names the inferred ordering relation, not execution
//! parallelism.

use crate::catalog::{PartialOrderCatalog, ShapeId};
use crate::error::{PologError, Result};
use crate::models::{
    ActivityLabel, ConcurrencyRelation, Position, Sequence, SuccessorMap,
};
use crate::oracle::{find_alpha_concurrency, LifecycleConfig, LifecycleOracle};
use crate::order::{build_by_name, build_by_position, OrderedTrace};
use crate::report::ConcurrencyReport;

/// Concurrency-detection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Bidirectional direct succession (alpha relation).
    Alpha,
    /// Start/complete interval overlap.
    Lifecycle,
}

/// Concurrency-detection scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One relation shared across the whole log.
    LogWide,
    /// A private relation per sequence.
    TraceWise,
}

/// Pipeline configuration: mode, scope, and lifecycle suffixes when needed.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Detection algorithm.
    pub mode: Mode,
    /// Detection scope.
    pub scope: Scope,
    /// Suffix configuration, required in lifecycle mode.
    pub lifecycle: Option<LifecycleConfig>,
}

impl PipelineConfig {
    /// Alpha-mode configuration.
    pub fn alpha(scope: Scope) -> Self {
        Self {
            mode: Mode::Alpha,
            scope,
            lifecycle: None,
        }
    }

    /// Lifecycle-mode configuration with the given suffixes.
    pub fn lifecycle(scope: Scope, config: LifecycleConfig) -> Self {
        Self {
            mode: Mode::Lifecycle,
            scope,
            lifecycle: Some(config),
        }
    }
}

/// Per-sequence pipeline output.
#[derive(Debug, Clone)]
pub struct TraceOutcome {
    /// Position -> immediate-successor positions within this sequence.
    pub successors: SuccessorMap<Position>,
    /// The covering relation as activity-label pairs.
    pub edges: Vec<(ActivityLabel, ActivityLabel)>,
    /// Isomorphism-class id of this sequence's partial order.
    pub shape_id: ShapeId,
}

/// Full-run pipeline output.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// One outcome per input sequence, in input order.
    pub traces: Vec<TraceOutcome>,
    /// Aggregated concurrency relation over the whole run.
    pub report: ConcurrencyReport,
    /// Number of distinct sequential shapes processed.
    pub sequential_variants: usize,
    /// Number of distinct partial-order shapes found (final catalog size).
    pub partial_order_variants: usize,
}

/// Drives one of the four mode × scope pipelines over a set of sequences.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Validate a configuration and build the pipeline.
    ///
    /// Fails with [`PologError::Config`] when lifecycle mode is selected
    /// without suffix configuration, before any processing begins.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        if config.mode == Mode::Lifecycle && config.lifecycle.is_none() {
            return Err(PologError::config(
                "lifecycle mode requires start/complete suffixes",
            ));
        }
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every sequence: detect concurrency, build partial orders,
    /// classify shapes, and aggregate the concurrency report.
    pub fn run(&self, sequences: &[Sequence]) -> Result<RunOutcome> {
        log::info!(
            "processing {} sequential variants (mode {:?}, scope {:?})",
            sequences.len(),
            self.config.mode,
            self.config.scope
        );

        let outcome = match (self.config.mode, self.config.scope) {
            (Mode::Alpha, Scope::LogWide) => self.run_alpha_log_wide(sequences),
            (Mode::Alpha, Scope::TraceWise) => self.run_alpha_trace_wise(sequences),
            (Mode::Lifecycle, Scope::LogWide) => self.run_lifecycle_log_wide(sequences)?,
            (Mode::Lifecycle, Scope::TraceWise) => self.run_lifecycle_trace_wise(sequences)?,
        };

        log::info!(
            "found {} partial-order variants among {} sequential variants",
            outcome.partial_order_variants,
            outcome.sequential_variants
        );
        Ok(outcome)
    }

    /// The lifecycle oracle for this pipeline. `new` already validated the
    /// configuration, so the error arm is unreachable in practice.
    fn lifecycle_oracle(&self) -> Result<LifecycleOracle> {
        self.config
            .lifecycle
            .clone()
            .map(LifecycleOracle::new)
            .ok_or_else(|| PologError::config("lifecycle mode requires start/complete suffixes"))
    }

    fn run_alpha_log_wide(&self, sequences: &[Sequence]) -> RunOutcome {
        // Pre-run: one shared successor map and relation over the whole log.
        let mut successors = SuccessorMap::new();
        let mut relation = ConcurrencyRelation::new();
        for sequence in sequences {
            (successors, relation) = find_alpha_concurrency(sequence, successors, relation);
        }
        log::debug!("log-wide alpha relation holds {} pairs", relation.len());

        let (traces, catalog) =
            classify_all(sequences.iter().map(|s| build_by_name(s, &relation)));
        finish(traces, catalog, relation, sequences.len())
    }

    fn run_alpha_trace_wise(&self, sequences: &[Sequence]) -> RunOutcome {
        let mut aggregated = ConcurrencyRelation::new();
        let mut catalog = PartialOrderCatalog::new();
        let mut traces = Vec::with_capacity(sequences.len());

        for sequence in sequences {
            let (_, relation) = find_alpha_concurrency(
                sequence,
                SuccessorMap::new(),
                ConcurrencyRelation::new(),
            );
            aggregated = aggregated.union(&relation);
            traces.push(classify_one(build_by_name(sequence, &relation), &mut catalog));
        }

        finish(traces, catalog, aggregated, sequences.len())
    }

    /// Lifecycle detection works on the suffixed labels, but the log-wide
    /// relation holds base names, so the orders are built over each
    /// sequence's completion-only projection (start events dropped, the
    /// complete suffix stripped). Successor positions in the outcome refer
    /// to that projection.
    fn run_lifecycle_log_wide(&self, sequences: &[Sequence]) -> Result<RunOutcome> {
        let oracle = self.lifecycle_oracle()?;

        // Pre-run: union every sequence's name-level relation; positional
        // precision is intentionally discarded at this scope.
        let mut relation = ConcurrencyRelation::new();
        for (index, sequence) in sequences.iter().enumerate() {
            let findings = oracle.find(sequence, index)?;
            relation = relation.union(&findings.by_name);
        }
        log::debug!("log-wide lifecycle relation holds {} pairs", relation.len());

        let (traces, catalog) = classify_all(sequences.iter().map(|sequence| {
            let completions = completions_only(oracle.config(), sequence);
            build_by_name(&completions, &relation)
        }));
        Ok(finish(traces, catalog, relation, sequences.len()))
    }

    fn run_lifecycle_trace_wise(&self, sequences: &[Sequence]) -> Result<RunOutcome> {
        let oracle = self.lifecycle_oracle()?;
        let mut aggregated = ConcurrencyRelation::new();
        let mut catalog = PartialOrderCatalog::new();
        let mut traces = Vec::with_capacity(sequences.len());

        for (index, sequence) in sequences.iter().enumerate() {
            let findings = oracle.find(sequence, index)?;
            aggregated = aggregated.union(&findings.by_name);
            let ordered =
                build_by_position(sequence, &findings.by_position, &findings.equivalences);
            traces.push(classify_one(ordered, &mut catalog));
        }

        Ok(finish(traces, catalog, aggregated, sequences.len()))
    }
}

/// Project a lifecycle-tagged sequence onto its complete events, suffix
/// stripped. This is the event set the host's sequential log carries in
/// log-wide lifecycle mode.
fn completions_only(config: &LifecycleConfig, sequence: &[ActivityLabel]) -> Sequence {
    sequence
        .iter()
        .filter_map(|label| config.completed_base(label).map(str::to_string))
        .collect()
}

fn classify_one(ordered: OrderedTrace, catalog: &mut PartialOrderCatalog) -> TraceOutcome {
    let OrderedTrace {
        successors,
        edges,
        graph,
    } = ordered;
    let shape_id = catalog.classify(graph);
    TraceOutcome {
        successors,
        edges,
        shape_id,
    }
}

fn classify_all(
    ordered: impl Iterator<Item = OrderedTrace>,
) -> (Vec<TraceOutcome>, PartialOrderCatalog) {
    let mut catalog = PartialOrderCatalog::new();
    let traces = ordered
        .map(|trace| classify_one(trace, &mut catalog))
        .collect();
    (traces, catalog)
}

fn finish(
    traces: Vec<TraceOutcome>,
    catalog: PartialOrderCatalog,
    relation: ConcurrencyRelation<ActivityLabel>,
    sequential_variants: usize,
) -> RunOutcome {
    RunOutcome {
        traces,
        partial_order_variants: catalog.len(),
        report: ConcurrencyReport::new(relation),
        sequential_variants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(names: &[&str]) -> Sequence {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lifecycle_mode_requires_suffixes() {
        let config = PipelineConfig {
            mode: Mode::Lifecycle,
            scope: Scope::LogWide,
            lifecycle: None,
        };
        assert!(matches!(
            Pipeline::new(config),
            Err(PologError::Config(_))
        ));
    }

    #[test]
    fn test_alpha_trace_wise_keeps_relations_private() {
        // Each trace alone shows no bidirectional succession, so every
        // trace stays a total order and the shapes differ by labeling.
        let sequences = vec![seq(&["A", "B", "C"]), seq(&["A", "C", "B"])];
        let pipeline = Pipeline::new(PipelineConfig::alpha(Scope::TraceWise)).unwrap();
        let outcome = pipeline.run(&sequences).unwrap();

        assert!(outcome.report.is_empty());
        assert_eq!(outcome.traces[0].shape_id, 1);
        assert_eq!(outcome.traces[1].shape_id, 2);
        assert_eq!(outcome.partial_order_variants, 2);
    }

    #[test]
    fn test_format_error_names_sequence() {
        let sequences = vec![
            seq(&["A+start", "A+complete"]),
            seq(&["A+start", "oops", "A+complete"]),
        ];
        let pipeline = Pipeline::new(PipelineConfig::lifecycle(
            Scope::TraceWise,
            LifecycleConfig::new("+start", "+complete"),
        ))
        .unwrap();

        let err = pipeline.run(&sequences).unwrap_err();
        assert_eq!(
            err,
            PologError::Format {
                label: "oops".to_string(),
                sequence: 1,
            }
        );
    }
}
