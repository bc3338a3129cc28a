//! Outbound notification record and its severity scale.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Urgency of a notification.
///
/// Ordered: `Info` < `Warn` < `Error` < `Fatal`. The ordering is load-bearing
/// for the minimum-severity reception gate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; typically filtered out by operators.
    #[default]
    Info,
    /// A condition worth attention but not yet sustained.
    Warn,
    /// An error occurrence.
    Error,
    /// A sustained or runaway condition.
    Fatal,
}

impl Severity {
    /// Uppercase name as shown to operators.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification ready to hand to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Urgency of the condition.
    pub severity: Severity,

    /// Hash of the object the condition belongs to.
    pub object_hash: i64,

    /// Display name of the object, resolved at delivery time.
    pub object_name: String,

    /// Object type of the object.
    pub object_type: String,

    /// Short headline for the condition.
    pub title: String,

    /// Human-readable description of the breach.
    pub message: String,

    /// When the decision to notify was made.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_matches_reception_levels() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Fatal).unwrap(), "\"fatal\"");
        assert_eq!(serde_json::from_str::<Severity>("\"warn\"").unwrap(), Severity::Warn);
    }
}
