//! Monitored agent identity as resolved by the agent directory.

use serde::{Deserialize, Serialize};

/// Identity and liveness of one monitored object (an application instance
/// known to the APM backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    /// Stable hash identifying the object across the backend.
    pub object_hash: i64,

    /// Display name of the object.
    pub name: String,

    /// Object type, the key used for per-type configuration overrides.
    pub object_type: String,

    /// Whether the backend currently considers the object alive.
    pub alive: bool,
}
