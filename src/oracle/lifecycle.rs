//! Lifecycle concurrency oracle.
//!
//! Treats each activity occurrence as the interval between its start event
//! and its matching complete event. Every event falling strictly inside such
//! an interval is concurrent with the interval's activity. Starts that never
//! complete define no interval and contribute nothing.

use crate::error::{PologError, Result};
use crate::models::{ActivityLabel, ConcurrencyRelation, EquivalenceMap, Position};

/// The two literal lifecycle suffixes in use in a log.
///
/// The host determines casing and spelling before calling; the core treats
/// both as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    start_suffix: String,
    complete_suffix: String,
}

impl LifecycleConfig {
    /// Create a suffix configuration.
    pub fn new(start_suffix: impl Into<String>, complete_suffix: impl Into<String>) -> Self {
        Self {
            start_suffix: start_suffix.into(),
            complete_suffix: complete_suffix.into(),
        }
    }

    /// Check whether a label is a start event.
    pub fn is_start(&self, label: &str) -> bool {
        label.ends_with(&self.start_suffix)
    }

    /// The completion label matching a start label.
    pub fn completion_of(&self, start_label: &str) -> String {
        match start_label.strip_suffix(&self.start_suffix) {
            Some(base) => format!("{base}{}", self.complete_suffix),
            None => start_label.to_string(),
        }
    }

    /// The base name when the label is a complete event, `None` otherwise.
    pub fn completed_base<'a>(&self, label: &'a str) -> Option<&'a str> {
        label.strip_suffix(&self.complete_suffix)
    }

    /// Strip the lifecycle suffix, yielding the base activity name.
    ///
    /// Fails when the label ends in neither suffix; `sequence` identifies
    /// the offending sequence in the error.
    pub fn base_name<'a>(&self, label: &'a str, sequence: usize) -> Result<&'a str> {
        if let Some(base) = label.strip_suffix(&self.complete_suffix) {
            Ok(base)
        } else if let Some(base) = label.strip_suffix(&self.start_suffix) {
            Ok(base)
        } else {
            Err(PologError::format(label, sequence))
        }
    }
}

/// Everything one sequence contributes to lifecycle concurrency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleFindings {
    /// Concurrency by base activity name, for log-wide use.
    pub by_name: ConcurrencyRelation<ActivityLabel>,
    /// Concurrency by event position, for trace-wise use.
    pub by_position: ConcurrencyRelation<Position>,
    /// Start position -> matching complete position.
    pub equivalences: EquivalenceMap,
}

/// Derives concurrency from temporal overlap of start/complete intervals.
#[derive(Debug, Clone)]
pub struct LifecycleOracle {
    config: LifecycleConfig,
}

impl LifecycleOracle {
    /// Create an oracle for the given suffix configuration.
    pub fn new(config: LifecycleConfig) -> Self {
        Self { config }
    }

    /// The suffix configuration in use.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Analyze one sequence of lifecycle-tagged labels.
    ///
    /// Every label must end in exactly one of the two configured suffixes;
    /// the first violation fails with [`PologError::Format`]. `sequence_index`
    /// identifies the sequence in errors and is not otherwise interpreted.
    ///
    /// For each start position `p` whose completion `q` exists later in the
    /// sequence: every position strictly between `p` and `q` is concurrent
    /// to `p`'s base activity by name (self-concurrency possible when the
    /// base name recurs) and concurrent to `q` by position, and `p` is
    /// recorded as equivalent to `q` (the start collapses onto its
    /// completion during order construction). A start with no later
    /// completion, including one at the final position, defines no interval
    /// and contributes nothing. Contributions from overlapping intervals
    /// merge by relation union.
    pub fn find(
        &self,
        sequence: &[ActivityLabel],
        sequence_index: usize,
    ) -> Result<LifecycleFindings> {
        // Validate every label up front so malformed events surface even
        // when they fall outside all intervals.
        for label in sequence {
            self.config.base_name(label, sequence_index)?;
        }

        let mut findings = LifecycleFindings::default();

        for (start, label) in sequence.iter().enumerate() {
            if !self.config.is_start(label) {
                continue;
            }
            let completion = self.config.completion_of(label);
            let Some(stop) = (start + 1..sequence.len()).find(|&i| sequence[i] == completion)
            else {
                continue;
            };

            let base = self.config.base_name(label, sequence_index)?;
            for between in start + 1..stop {
                let other = self.config.base_name(&sequence[between], sequence_index)?;
                findings.by_name.add_pair(base.to_string(), other.to_string());
                findings.by_position.add_pair(stop, between);
            }
            findings.equivalences.insert(start, stop);
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> LifecycleOracle {
        LifecycleOracle::new(LifecycleConfig::new("+start", "+complete"))
    }

    fn seq(names: &[&str]) -> Vec<ActivityLabel> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nested_intervals_are_concurrent() {
        let findings = oracle()
            .find(&seq(&["A+start", "B+start", "B+complete", "A+complete"]), 0)
            .unwrap();

        assert!(findings.by_name.contains(&"A".to_string(), &"B".to_string()));
        assert_eq!(findings.by_name.len(), 1);

        // A's completion (position 3) overlaps B's start and completion.
        assert!(findings.by_position.contains(&3, &1));
        assert!(findings.by_position.contains(&3, &2));

        assert_eq!(findings.equivalences.get(&0), Some(&3));
        assert_eq!(findings.equivalences.get(&1), Some(&2));
    }

    #[test]
    fn test_trailing_start_defines_no_interval() {
        let findings = oracle()
            .find(&seq(&["A+start", "A+complete", "C+start"]), 0)
            .unwrap();

        assert!(findings.by_name.is_empty());
        assert!(!findings.equivalences.contains_key(&2));
        assert_eq!(findings.equivalences.len(), 1);
    }

    #[test]
    fn test_unmatched_start_contributes_nothing() {
        let findings = oracle()
            .find(&seq(&["C+start", "A+start", "A+complete"]), 0)
            .unwrap();

        // C never completes; only A's closed (empty) interval is recorded.
        assert!(findings.by_name.is_empty());
        assert!(findings.by_position.is_empty());
        assert_eq!(findings.equivalences.len(), 1);
        assert_eq!(findings.equivalences.get(&1), Some(&2));
    }

    #[test]
    fn test_self_concurrency_on_recurring_base_name() {
        let findings = oracle()
            .find(&seq(&["A+start", "A+start", "A+complete", "A+complete"]), 0)
            .unwrap();

        assert!(findings.by_name.contains(&"A".to_string(), &"A".to_string()));
    }

    #[test]
    fn test_malformed_label_is_a_format_error() {
        let err = oracle()
            .find(&seq(&["A+start", "B+banana", "A+complete"]), 7)
            .unwrap_err();

        assert_eq!(
            err,
            PologError::Format {
                label: "B+banana".to_string(),
                sequence: 7,
            }
        );
    }

    #[test]
    fn test_intervals_ending_at_same_completion_union_positionally() {
        // Both A-starts scan to the same first completion, so their
        // positional contributions overlap. The merged facts must be a set
        // union, never duplicated.
        let trace = seq(&["A+start", "A+start", "B+start", "A+complete"]);
        let findings = oracle().find(&trace, 0).unwrap();

        assert!(findings.by_position.contains(&3, &1));
        assert!(findings.by_position.contains(&3, &2));
        assert_eq!(findings.by_position.len(), 2);

        assert!(findings.by_name.contains(&"A".to_string(), &"A".to_string()));
        assert!(findings.by_name.contains(&"A".to_string(), &"B".to_string()));

        assert_eq!(findings.equivalences.get(&0), Some(&3));
        assert_eq!(findings.equivalences.get(&1), Some(&3));
    }
}
