//! Error types for partial-order log mining.

use thiserror::Error;

/// Result type for polog operations.
pub type Result<T> = std::result::Result<T, PologError>;

/// Errors that can occur while mining partial orders.
///
/// All concurrency and order computations are pure functions of well-formed
/// input; the only failure modes are malformed lifecycle labels and invalid
/// pipeline configuration. Failures are deterministic, never transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PologError {
    /// A lifecycle label ends in neither of the configured suffixes.
    #[error("lifecycle label `{label}` in sequence {sequence} ends in neither configured suffix")]
    Format {
        /// The offending activity label.
        label: String,
        /// Index of the sequence the label was found in.
        sequence: usize,
    },

    /// The pipeline configuration is unusable.
    #[error("invalid pipeline configuration: {0}")]
    Config(String),
}

impl PologError {
    /// Create a format error for a malformed lifecycle label.
    pub fn format(label: impl Into<String>, sequence: usize) -> Self {
        Self::Format {
            label: label.into(),
            sequence,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
