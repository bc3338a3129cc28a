//! The shared throttle state machine.
//!
//! For each condition key the engine cycles through three windows measured
//! from the stored `last_modified` timestamp, where `I` is the configured
//! interval:
//!
//! - `diff < I`: suppression. Repeats are counted, not alerted. Always-urgent
//!   policies are the exception and notify on every occurrence.
//! - `I <= diff < 2I`: escalation. The accumulated count decides the
//!   severity and the window is reset.
//! - `diff >= 2I`: the condition went quiet for two full intervals and is
//!   treated as resolved; the window restarts silently.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::{
    engine::{error::EvaluationError, policy::AlertPolicy},
    models::{AlertContext, AlertHistory, Notification, Severity},
    store::HistoryStore,
};

/// Evaluates observations against per-condition history and decides
/// silence, notification, or escalation.
pub struct ThrottleEngine {
    store: Arc<HistoryStore>,

    /// One lock per alert pattern so same-key evaluations serialize across
    /// the read-decide-write sequence while distinct keys run in parallel.
    pattern_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ThrottleEngine {
    /// Creates an engine over the given history store.
    pub fn new(store: Arc<HistoryStore>) -> Self {
        Self { store, pattern_locks: DashMap::new() }
    }

    fn pattern_lock(&self, pattern: &str) -> Arc<Mutex<()>> {
        self.pattern_locks
            .entry(pattern.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Evaluates one observation.
    ///
    /// Returns the notification to deliver, or `None` when the observation
    /// is absorbed. Failures are contained here: the observation is dropped
    /// with a log line and history stays untouched.
    pub fn evaluate(&self, context: &AlertContext, policy: &AlertPolicy) -> Option<Notification> {
        let lock = self.pattern_lock(&context.alert_pattern);
        let _guard = lock.lock();

        match self.try_evaluate(context, policy) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(
                    pattern = %context.alert_pattern,
                    kind = policy.kind(),
                    error = %e,
                    "alert evaluation failed; observation dropped"
                );
                None
            }
        }
    }

    fn try_evaluate(
        &self,
        context: &AlertContext,
        policy: &AlertPolicy,
    ) -> Result<Option<Notification>, EvaluationError> {
        if context.interval_minutes == 0 {
            return Err(EvaluationError::MissingConfig(format!(
                "interval for {} conditions must be at least one minute",
                policy.kind()
            )));
        }
        policy.validate_metric(context)?;

        let now = Utc::now();
        let pattern = context.alert_pattern.as_str();

        let Some(mut history) = self.store.get(pattern) else {
            self.store.put(pattern, AlertHistory::new(now));
            tracing::debug!(
                pattern,
                kind = policy.kind(),
                object = %context.object_name,
                "first sighting; suppression window armed"
            );
            return Ok(None);
        };

        let diff_ms = (now - history.last_modified).num_milliseconds();
        let interval_ms = i64::from(context.interval_minutes) * 60_000;

        if diff_ms < interval_ms {
            let count = history.record_repeat();
            self.store.put(pattern, history);

            if policy.always_urgent() {
                let severity = policy.severity(context, count);
                tracing::debug!(
                    pattern,
                    occurrence_count = count,
                    diff_ms,
                    "urgent condition; notifying despite open suppression window"
                );
                return Ok(Some(self.notification(context, policy, severity, count, now)));
            }

            tracing::debug!(pattern, occurrence_count = count, diff_ms, "repeat suppressed");
            return Ok(None);
        }

        if diff_ms < interval_ms * 2 {
            let count = history.occurrence_count;
            let severity = policy.severity(context, count);
            self.store.put(pattern, AlertHistory::new(now));

            if policy.should_skip(severity) {
                tracing::debug!(
                    pattern,
                    occurrence_count = count,
                    %severity,
                    "escalation skipped; window reset"
                );
                return Ok(None);
            }

            tracing::debug!(pattern, occurrence_count = count, %severity, diff_ms, "alerting");
            return Ok(Some(self.notification(context, policy, severity, count, now)));
        }

        self.store.put(pattern, AlertHistory::new(now));
        tracing::debug!(pattern, diff_ms, "condition went quiet; window reset");
        Ok(None)
    }

    fn notification(
        &self,
        context: &AlertContext,
        policy: &AlertPolicy,
        severity: Severity,
        occurrence_count: u32,
        now: DateTime<Utc>,
    ) -> Notification {
        Notification {
            severity,
            object_hash: context.object_hash,
            object_name: context.object_name.clone(),
            object_type: context.object_type.clone(),
            title: policy.title(context),
            message: policy.message(context, occurrence_count),
            timestamp: now,
        }
    }
}
