//! Aggregated concurrency reporting.

use std::fmt;

use serde::Serialize;

use crate::models::{ActivityLabel, ConcurrencyRelation};

/// One ordered realization of a concurrent pair, as a table row.
///
/// Matches the two-column layout hosts typically export; the core never
/// writes files itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// First activity of the realization.
    pub first: ActivityLabel,
    /// Second activity of the realization.
    pub second: ActivityLabel,
}

/// Human-readable and tabular view of an aggregated concurrency relation.
#[derive(Debug, Clone)]
pub struct ConcurrencyReport {
    relation: ConcurrencyRelation<ActivityLabel>,
}

impl ConcurrencyReport {
    /// Wrap an aggregated name-level relation.
    pub fn new(relation: ConcurrencyRelation<ActivityLabel>) -> Self {
        Self { relation }
    }

    /// The underlying relation.
    pub fn relation(&self) -> &ConcurrencyRelation<ActivityLabel> {
        &self.relation
    }

    /// Check whether no concurrency was detected.
    pub fn is_empty(&self) -> bool {
        self.relation.is_empty()
    }

    /// Tabular rows, one per ordered realization.
    pub fn rows(&self) -> Vec<ReportRow> {
        self.relation
            .realizations()
            .map(|(first, second)| ReportRow { first, second })
            .collect()
    }
}

impl fmt::Display for ConcurrencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relation.is_empty() {
            return writeln!(f, "No concurrencies found in the log.");
        }
        writeln!(f, "The following concurrencies were detected:")?;
        for (first, second) in self.relation.realizations() {
            writeln!(f, "({first}, {second})")?;
        }
        Ok(())
    }
}
