//! Periodic thread-count sampling.
//!
//! The engine owns no timers; long-lived metrics like thread count are fed
//! to it by this recurring task, which reads each live agent's thread count
//! from a host-provided source and pushes breaches through the service like
//! any other observation.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::{
    config::AppConfig, directory::AgentDirectory, models::AgentInfo, service::AlertService,
};

/// Errors reading a thread count from the backend.
#[derive(Debug, Error)]
pub enum ThreadCountError {
    /// The agent did not answer the thread-list request.
    #[error("thread count unavailable: {0}")]
    Unavailable(String),
}

/// Reads the current thread count of one agent.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ThreadCountSource: Send + Sync {
    /// Returns the agent's current thread count.
    async fn thread_count(&self, agent: &AgentInfo) -> Result<u32, ThreadCountError>;
}

/// Recurring task sampling thread counts for all live agents.
pub struct ThreadCountPoller {
    config: Arc<AppConfig>,
    service: Arc<AlertService>,
    directory: Arc<dyn AgentDirectory>,
    source: Arc<dyn ThreadCountSource>,
}

impl ThreadCountPoller {
    /// Creates a poller over the given collaborators.
    pub fn new(
        config: Arc<AppConfig>,
        service: Arc<AlertService>,
        directory: Arc<dyn AgentDirectory>,
        source: Arc<dyn ThreadCountSource>,
    ) -> Self {
        Self { config, service, directory, source }
    }

    /// Runs the sampling loop until the task is dropped.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.config.thread_poll_interval_secs);
        loop {
            interval.tick().await;
            self.poll_once().await;
        }
    }

    /// Samples every live agent once. Per-agent failures are logged and do
    /// not stop the sweep.
    pub async fn poll_once(&self) {
        for agent in self.directory.agents() {
            if !agent.alive {
                continue;
            }
            let settings = self.config.settings_for(&agent.object_type);
            if settings.thread_count_threshold == 0 {
                continue;
            }
            match self.source.thread_count(&agent).await {
                Ok(thread_count) => {
                    self.service.process_thread_count(&agent, thread_count).await;
                }
                Err(e) => {
                    tracing::debug!(
                        agent = %agent.name,
                        error = %e,
                        "thread count sampling failed"
                    );
                }
            }
        }
    }
}
