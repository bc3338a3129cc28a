//! Typed alert settings with per-object-type overrides.
//!
//! Lookups fall back in two levels: a per-object-type override wins over the
//! global settings, and the serde defaults below are the hard-coded last
//! resort. Thresholds of 0 disable the corresponding check entirely.

use serde::{Deserialize, Serialize};

use crate::models::Severity;

fn default_interval_minutes() -> u32 {
    5
}

fn default_elapsed_rate_threshold() -> u32 {
    1
}

/// Fully-resolved alert settings for one object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    /// Whether notifications are delivered at all.
    pub enabled: bool,

    /// Minimum severity an emitted notification must reach to be delivered.
    pub min_severity: Severity,

    /// Elapsed-time threshold in milliseconds; 0 disables the check.
    pub elapsed_threshold_ms: i64,

    /// Suppression window size for elapsed-time conditions.
    pub elapsed_interval_minutes: u32,

    /// Suppressed-repeats-per-minute rate at which a slowdown becomes FATAL.
    pub elapsed_rate_threshold: u32,

    /// GC-time threshold in milliseconds; 0 disables the check.
    pub gc_time_threshold_ms: i64,

    /// Suppression window size for GC-time conditions.
    pub gc_interval_minutes: u32,

    /// Suppression window size for error conditions.
    pub error_interval_minutes: u32,

    /// Thread-count threshold; 0 disables the check and the poller.
    pub thread_count_threshold: u32,

    /// Suppression window size for thread-count conditions.
    pub thread_interval_minutes: u32,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            min_severity: Severity::Info,
            elapsed_threshold_ms: 0,
            elapsed_interval_minutes: default_interval_minutes(),
            elapsed_rate_threshold: default_elapsed_rate_threshold(),
            gc_time_threshold_ms: 0,
            gc_interval_minutes: default_interval_minutes(),
            error_interval_minutes: default_interval_minutes(),
            thread_count_threshold: 0,
            thread_interval_minutes: default_interval_minutes(),
        }
    }
}

/// Partial settings overriding the global [`AlertSettings`] for one object
/// type. Absent fields fall through to the global value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettingsOverride {
    /// Overrides [`AlertSettings::enabled`].
    pub enabled: Option<bool>,
    /// Overrides [`AlertSettings::min_severity`].
    pub min_severity: Option<Severity>,
    /// Overrides [`AlertSettings::elapsed_threshold_ms`].
    pub elapsed_threshold_ms: Option<i64>,
    /// Overrides [`AlertSettings::elapsed_interval_minutes`].
    pub elapsed_interval_minutes: Option<u32>,
    /// Overrides [`AlertSettings::elapsed_rate_threshold`].
    pub elapsed_rate_threshold: Option<u32>,
    /// Overrides [`AlertSettings::gc_time_threshold_ms`].
    pub gc_time_threshold_ms: Option<i64>,
    /// Overrides [`AlertSettings::gc_interval_minutes`].
    pub gc_interval_minutes: Option<u32>,
    /// Overrides [`AlertSettings::error_interval_minutes`].
    pub error_interval_minutes: Option<u32>,
    /// Overrides [`AlertSettings::thread_count_threshold`].
    pub thread_count_threshold: Option<u32>,
    /// Overrides [`AlertSettings::thread_interval_minutes`].
    pub thread_interval_minutes: Option<u32>,
}

impl AlertSettingsOverride {
    /// Resolves this override against the global `base` settings.
    pub fn apply(&self, base: &AlertSettings) -> AlertSettings {
        AlertSettings {
            enabled: self.enabled.unwrap_or(base.enabled),
            min_severity: self.min_severity.unwrap_or(base.min_severity),
            elapsed_threshold_ms: self.elapsed_threshold_ms.unwrap_or(base.elapsed_threshold_ms),
            elapsed_interval_minutes: self
                .elapsed_interval_minutes
                .unwrap_or(base.elapsed_interval_minutes),
            elapsed_rate_threshold: self
                .elapsed_rate_threshold
                .unwrap_or(base.elapsed_rate_threshold),
            gc_time_threshold_ms: self.gc_time_threshold_ms.unwrap_or(base.gc_time_threshold_ms),
            gc_interval_minutes: self.gc_interval_minutes.unwrap_or(base.gc_interval_minutes),
            error_interval_minutes: self
                .error_interval_minutes
                .unwrap_or(base.error_interval_minutes),
            thread_count_threshold: self
                .thread_count_threshold
                .unwrap_or(base.thread_count_threshold),
            thread_interval_minutes: self
                .thread_interval_minutes
                .unwrap_or(base.thread_interval_minutes),
        }
    }
}
