//! Application configuration loaded from file and environment.

use std::{collections::HashMap, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{
    alert_settings::{AlertSettings, AlertSettingsOverride},
    deserialize_duration_from_secs,
};

/// Provides the default value for history_capacity.
fn default_history_capacity() -> usize {
    1000
}

/// Provides the default value for thread_poll_interval_secs.
fn default_thread_poll_interval() -> Duration {
    Duration::from_secs(5)
}

/// Application configuration for the alerting pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Maximum number of alert conditions tracked at once; the oldest
    /// tracked condition is evicted beyond this.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// How often the thread-count poller samples live agents.
    #[serde(
        deserialize_with = "deserialize_duration_from_secs",
        default = "default_thread_poll_interval"
    )]
    pub thread_poll_interval_secs: Duration,

    /// Global alert settings, the fallback for every object type.
    #[serde(default)]
    pub alerts: AlertSettings,

    /// Per-object-type overrides keyed by object type.
    #[serde(default)]
    pub overrides: HashMap<String, AlertSettingsOverride>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            thread_poll_interval_secs: default_thread_poll_interval(),
            alerts: AlertSettings::default(),
            overrides: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading `app.yaml` from the
    /// configuration directory, with `QUELL__`-prefixed environment
    /// variables taking precedence.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("QUELL").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Resolves the effective settings for `object_type`, applying its
    /// override on top of the global settings when one exists.
    pub fn settings_for(&self, object_type: &str) -> AlertSettings {
        match self.overrides.get(object_type) {
            Some(type_override) => type_override.apply(&self.alerts),
            None => self.alerts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Severity;

    use super::*;

    #[test]
    fn settings_for_unknown_type_returns_global_settings() {
        let config = AppConfig {
            alerts: AlertSettings { enabled: true, ..AlertSettings::default() },
            ..AppConfig::default()
        };

        let settings = config.settings_for("tomcat");
        assert!(settings.enabled);
        assert_eq!(settings, config.alerts);
    }

    #[test]
    fn settings_for_overridden_type_merges_on_top_of_global() {
        let mut config = AppConfig {
            alerts: AlertSettings {
                enabled: true,
                elapsed_threshold_ms: 3000,
                ..AlertSettings::default()
            },
            ..AppConfig::default()
        };
        config.overrides.insert(
            "batch".to_owned(),
            AlertSettingsOverride {
                min_severity: Some(Severity::Error),
                ..AlertSettingsOverride::default()
            },
        );

        let batch = config.settings_for("batch");
        assert_eq!(batch.min_severity, Severity::Error);
        assert_eq!(batch.elapsed_threshold_ms, 3000);

        let tomcat = config.settings_for("tomcat");
        assert_eq!(tomcat.min_severity, Severity::Info);
    }

    #[test]
    fn deserializes_from_nested_document() {
        let raw = r#"{
            "history_capacity": 64,
            "thread_poll_interval_secs": 10,
            "alerts": { "enabled": true, "gc_time_threshold_ms": 2000 },
            "overrides": { "tomcat": { "thread_count_threshold": 400 } }
        }"#;

        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.history_capacity, 64);
        assert_eq!(config.thread_poll_interval_secs, Duration::from_secs(10));
        assert!(config.alerts.enabled);
        assert_eq!(config.settings_for("tomcat").thread_count_threshold, 400);
        // Fields absent from the document keep their hard-coded defaults.
        assert_eq!(config.alerts.elapsed_interval_minutes, 5);
    }
}
