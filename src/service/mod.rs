//! Observation intake and delivery gating around the throttle engine.
//!
//! The service is what observation sources talk to: it applies the
//! configured enablement thresholds, derives the condition key, picks the
//! policy, runs the engine, and finally gates and hands any resulting
//! notification to the dispatcher. Dispatch failures are logged and
//! swallowed; delivery reliability is the dispatcher's problem.

use std::sync::Arc;

use crate::{
    config::{AlertSettings, AppConfig},
    directory::AgentDirectory,
    dispatch::Dispatcher,
    engine::{AlertPolicy, ThrottleEngine},
    models::{AgentInfo, AlertContext, GcSample, Notification, SpanObservation},
    store::HistoryStore,
};

/// Front door of the alerting pipeline.
pub struct AlertService {
    config: Arc<AppConfig>,
    engine: ThrottleEngine,
    directory: Arc<dyn AgentDirectory>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl AlertService {
    /// Creates a service over an explicitly constructed history store.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<HistoryStore>,
        directory: Arc<dyn AgentDirectory>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self { config, engine: ThrottleEngine::new(store), directory, dispatcher }
    }

    /// Processes one completed service call, checking its error code and
    /// elapsed time against the configured thresholds.
    pub async fn process_span(&self, span: &SpanObservation) {
        let Some(agent) = self.directory.lookup(span.object_hash) else {
            tracing::debug!(object_hash = span.object_hash, "span for unknown agent; ignored");
            return;
        };
        let settings = self.config.settings_for(&agent.object_type);

        if span.error_code != 0 {
            let policy = AlertPolicy::Error;
            let context = AlertContext::builder()
                .alert_pattern(format!(
                    "{}_{}_{}",
                    span.object_hash,
                    policy.kind(),
                    span.service_id
                ))
                .object(agent.object_hash, agent.name.clone(), agent.object_type.clone())
                .interval_minutes(settings.error_interval_minutes)
                .metric_value(span.error_code.to_string())
                .service_name(span.service_name.clone());
            let context = match &span.error_message {
                Some(message) => context.error_message(message.clone()),
                None => context,
            }
            .build();

            if let Some(notification) = self.engine.evaluate(&context, &policy) {
                self.deliver(&settings, notification).await;
            }
        }

        if settings.elapsed_threshold_ms != 0 && span.elapsed_ms > settings.elapsed_threshold_ms {
            let policy =
                AlertPolicy::ElapsedTime { rate_threshold: settings.elapsed_rate_threshold };
            let context = AlertContext::builder()
                .alert_pattern(format!(
                    "{}_{}_{}",
                    span.object_hash,
                    policy.kind(),
                    span.service_id
                ))
                .object(agent.object_hash, agent.name.clone(), agent.object_type.clone())
                .interval_minutes(settings.elapsed_interval_minutes)
                .metric_value(span.elapsed_ms.to_string())
                .threshold(settings.elapsed_threshold_ms)
                .service_name(span.service_name.clone())
                .build();

            if let Some(notification) = self.engine.evaluate(&context, &policy) {
                self.deliver(&settings, notification).await;
            }
        }
    }

    /// Processes one GC-time counter sample. Only realtime samples count;
    /// aggregated replays are ignored.
    pub async fn process_gc_sample(&self, sample: &GcSample) {
        if !sample.realtime {
            return;
        }
        let Some(agent) = self.directory.lookup(sample.object_hash) else {
            tracing::debug!(object_hash = sample.object_hash, "sample for unknown agent; ignored");
            return;
        };
        let settings = self.config.settings_for(&agent.object_type);
        if settings.gc_time_threshold_ms == 0 || sample.gc_time_ms <= settings.gc_time_threshold_ms
        {
            return;
        }

        let policy = AlertPolicy::GcTime;
        let context = AlertContext::builder()
            .alert_pattern(format!("{}_{}", sample.object_hash, policy.kind()))
            .object(agent.object_hash, agent.name.clone(), agent.object_type.clone())
            .interval_minutes(settings.gc_interval_minutes)
            .metric_value(sample.gc_time_ms.to_string())
            .threshold(settings.gc_time_threshold_ms)
            .build();

        if let Some(notification) = self.engine.evaluate(&context, &policy) {
            self.deliver(&settings, notification).await;
        }
    }

    /// Processes one thread-count reading for `agent`.
    pub async fn process_thread_count(&self, agent: &AgentInfo, thread_count: u32) {
        let settings = self.config.settings_for(&agent.object_type);
        if settings.thread_count_threshold == 0
            || thread_count <= settings.thread_count_threshold
        {
            return;
        }

        let policy = AlertPolicy::ThreadCount;
        let context = AlertContext::builder()
            .alert_pattern(format!("{}_{}", agent.object_hash, policy.kind()))
            .object(agent.object_hash, agent.name.clone(), agent.object_type.clone())
            .interval_minutes(settings.thread_interval_minutes)
            .metric_value(thread_count.to_string())
            .threshold(i64::from(settings.thread_count_threshold))
            .build();

        if let Some(notification) = self.engine.evaluate(&context, &policy) {
            self.deliver(&settings, notification).await;
        }
    }

    /// Applies the reception gates and hands the notification to the
    /// dispatcher, resolving the display name as the directory knows it now.
    async fn deliver(&self, settings: &AlertSettings, mut notification: Notification) {
        if !settings.enabled {
            tracing::debug!(
                object_type = %notification.object_type,
                "notifications disabled for object type; dropped"
            );
            return;
        }
        if notification.severity < settings.min_severity {
            tracing::debug!(
                severity = %notification.severity,
                min_severity = %settings.min_severity,
                "notification below reception level; dropped"
            );
            return;
        }

        notification.object_name = self
            .directory
            .lookup(notification.object_hash)
            .map(|agent| agent.name)
            .unwrap_or_else(|| "N/A".to_owned());

        if let Err(e) = self.dispatcher.dispatch(notification).await {
            tracing::error!(error = %e, "failed to dispatch notification");
        }
    }
}
