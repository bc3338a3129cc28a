//! Immutable snapshot of one incoming breach observation.

use serde::{Deserialize, Serialize};

/// Everything the throttle engine needs to evaluate a single observation.
///
/// Built fresh per observation and discarded after one `evaluate` call.
/// `metric_value` is kept as the raw string the backend reported; policies
/// that need a number parse it lazily, so a malformed value fails only the
/// evaluation that touches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertContext {
    /// Key identifying one recurring condition instance, typically
    /// `{object_hash}_{metric kind}` plus a service discriminator.
    pub alert_pattern: String,

    /// Hash of the object the observation belongs to.
    pub object_hash: i64,

    /// Display name of the object at observation time.
    pub object_name: String,

    /// Object type of the object.
    pub object_type: String,

    /// Operator-configured window size in minutes. Must be at least 1.
    pub interval_minutes: u32,

    /// Raw metric value as reported by the backend.
    pub metric_value: String,

    /// The configured threshold the metric breached.
    pub threshold: i64,

    /// Service the observation was recorded against, when span-derived.
    pub service_name: Option<String>,

    /// Resolved error text, present for error observations.
    pub error_message: Option<String>,
}

impl AlertContext {
    /// Starts building a context.
    pub fn builder() -> AlertContextBuilder {
        AlertContextBuilder::default()
    }
}

/// Builder for [`AlertContext`].
#[derive(Debug, Default)]
pub struct AlertContextBuilder {
    alert_pattern: String,
    object_hash: i64,
    object_name: String,
    object_type: String,
    interval_minutes: u32,
    metric_value: String,
    threshold: i64,
    service_name: Option<String>,
    error_message: Option<String>,
}

impl AlertContextBuilder {
    /// Sets the condition key.
    pub fn alert_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.alert_pattern = pattern.into();
        self
    }

    /// Sets the object identity the observation belongs to.
    pub fn object(mut self, hash: i64, name: impl Into<String>, obj_type: impl Into<String>) -> Self {
        self.object_hash = hash;
        self.object_name = name.into();
        self.object_type = obj_type.into();
        self
    }

    /// Sets the window size in minutes.
    pub fn interval_minutes(mut self, minutes: u32) -> Self {
        self.interval_minutes = minutes;
        self
    }

    /// Sets the raw metric value.
    pub fn metric_value(mut self, value: impl Into<String>) -> Self {
        self.metric_value = value.into();
        self
    }

    /// Sets the breached threshold.
    pub fn threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the service name for span-derived observations.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Sets the resolved error text for error observations.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Finalizes the context.
    pub fn build(self) -> AlertContext {
        AlertContext {
            alert_pattern: self.alert_pattern,
            object_hash: self.object_hash,
            object_name: self.object_name,
            object_type: self.object_type,
            interval_minutes: self.interval_minutes,
            metric_value: self.metric_value,
            threshold: self.threshold,
            service_name: self.service_name,
            error_message: self.error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_carries_all_fields() {
        let context = AlertContext::builder()
            .alert_pattern("42_elapsed_7")
            .object(42, "order-api-1", "tomcat")
            .interval_minutes(5)
            .metric_value("8211")
            .threshold(3000)
            .service_name("/orders/{id}")
            .build();

        assert_eq!(context.alert_pattern, "42_elapsed_7");
        assert_eq!(context.object_hash, 42);
        assert_eq!(context.object_name, "order-api-1");
        assert_eq!(context.object_type, "tomcat");
        assert_eq!(context.interval_minutes, 5);
        assert_eq!(context.metric_value, "8211");
        assert_eq!(context.threshold, 3000);
        assert_eq!(context.service_name.as_deref(), Some("/orders/{id}"));
        assert_eq!(context.error_message, None);
    }
}
