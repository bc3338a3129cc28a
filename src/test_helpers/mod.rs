//! Shared fakes and builders for unit and integration tests.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{
    config::{AlertSettings, AppConfig},
    directory::AgentDirectory,
    dispatch::{DispatchError, Dispatcher},
    models::{AgentInfo, Notification},
    poller::{ThreadCountError, ThreadCountSource},
};

/// A dispatcher that records everything handed to it.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingDispatcher {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything dispatched so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }
}

#[async_trait::async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
        self.sent.lock().push(notification);
        Ok(())
    }
}

/// An agent directory backed by a fixed set of agents.
#[derive(Debug, Default)]
pub struct StaticAgentDirectory {
    agents: HashMap<i64, AgentInfo>,
}

impl StaticAgentDirectory {
    /// Creates a directory knowing exactly the given agents.
    pub fn new(agents: impl IntoIterator<Item = AgentInfo>) -> Self {
        Self { agents: agents.into_iter().map(|a| (a.object_hash, a)).collect() }
    }
}

impl AgentDirectory for StaticAgentDirectory {
    fn lookup(&self, object_hash: i64) -> Option<AgentInfo> {
        self.agents.get(&object_hash).cloned()
    }

    fn agents(&self) -> Vec<AgentInfo> {
        self.agents.values().cloned().collect()
    }
}

/// A thread-count source answering from a fixed table; unknown agents fail.
#[derive(Debug, Default)]
pub struct FixedThreadCountSource {
    counts: HashMap<i64, u32>,
}

impl FixedThreadCountSource {
    /// Creates a source returning the given per-agent counts.
    pub fn new(counts: impl IntoIterator<Item = (i64, u32)>) -> Self {
        Self { counts: counts.into_iter().collect() }
    }
}

#[async_trait::async_trait]
impl ThreadCountSource for FixedThreadCountSource {
    async fn thread_count(&self, agent: &AgentInfo) -> Result<u32, ThreadCountError> {
        self.counts
            .get(&agent.object_hash)
            .copied()
            .ok_or_else(|| ThreadCountError::Unavailable(format!("no agent {}", agent.object_hash)))
    }
}

/// A live tomcat agent with the given hash.
pub fn test_agent(object_hash: i64) -> AgentInfo {
    AgentInfo {
        object_hash,
        name: format!("agent-{object_hash}"),
        object_type: "tomcat".to_owned(),
        alive: true,
    }
}

/// Settings with delivery enabled and all thresholds armed at test-friendly
/// values.
pub fn armed_settings() -> AlertSettings {
    AlertSettings {
        enabled: true,
        elapsed_threshold_ms: 3000,
        gc_time_threshold_ms: 1000,
        thread_count_threshold: 300,
        ..AlertSettings::default()
    }
}

/// An [`AppConfig`] carrying [`armed_settings`] globally.
pub fn armed_config() -> Arc<AppConfig> {
    Arc::new(AppConfig { alerts: armed_settings(), ..AppConfig::default() })
}
