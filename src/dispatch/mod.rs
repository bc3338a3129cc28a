//! Outbound notification dispatch interface.
//!
//! The pipeline hands finished [`Notification`]s to a [`Dispatcher`] and is
//! done with them; transport, authentication, and retry all live on the
//! other side of this trait.

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::models::Notification;

/// Errors a dispatcher may report back to the pipeline.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The delivery backend rejected the notification.
    #[error("notification rejected: {0}")]
    Rejected(String),

    /// The delivery channel is not reachable right now.
    #[error("delivery channel unavailable: {0}")]
    Unavailable(String),
}

/// Consumes notifications for delivery to operators.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    /// Delivers one notification.
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError>;
}

/// A dispatcher that emits notifications as structured log events. Useful
/// for wiring the pipeline before a real delivery backend exists.
#[derive(Debug, Default)]
pub struct LogDispatcher;

#[async_trait::async_trait]
impl Dispatcher for LogDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
        tracing::info!(
            severity = %notification.severity,
            object = %notification.object_name,
            object_type = %notification.object_type,
            title = %notification.title,
            message = %notification.message,
            "alert notification"
        );
        Ok(())
    }
}
