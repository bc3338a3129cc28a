//! Agent directory collaborator interface.

#[cfg(test)]
use mockall::automock;

use crate::models::AgentInfo;

/// Resolves monitored object identities against the APM backend's registry.
///
/// Implemented by the host; the pipeline only reads from it.
#[cfg_attr(test, automock)]
pub trait AgentDirectory: Send + Sync {
    /// Looks up the agent registered under `object_hash`.
    fn lookup(&self, object_hash: i64) -> Option<AgentInfo>;

    /// Returns every agent the backend currently knows, alive or not.
    fn agents(&self) -> Vec<AgentInfo>;
}
