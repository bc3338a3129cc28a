//! Error types for alert evaluation.

use thiserror::Error;

/// Failures local to a single `evaluate` call.
///
/// These are caught at the evaluation boundary: the observation is logged
/// and dropped, history is left untouched, and no other key is affected.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A required configuration value is absent or unusable.
    #[error("missing or invalid configuration: {0}")]
    MissingConfig(String),

    /// The metric value cannot be parsed into the number the policy needs.
    #[error("malformed metric value '{value}' for {kind} condition")]
    MalformedMetric {
        /// The metric kind whose policy rejected the value.
        kind: &'static str,
        /// The raw value as reported by the backend.
        value: String,
    },
}
