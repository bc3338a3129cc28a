//! Per-metric-kind alert policies.
//!
//! Each policy is a value in a closed set rather than a trait object: the
//! throttle engine owns all control flow and asks the policy only for pure
//! decisions (severity, skip, urgency) and message text.

use crate::{
    engine::error::EvaluationError,
    models::{AlertContext, Severity},
};

/// Pure per-metric-kind decision logic plugged into the throttle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertPolicy {
    /// Service response time exceeded its threshold.
    ElapsedTime {
        /// Occurrences-per-interval-minute rate at which a sustained
        /// slowdown escalates to `Fatal`.
        rate_threshold: u32,
    },
    /// Garbage-collection time exceeded its threshold.
    GcTime,
    /// A service call failed. Error conditions are always urgent: they
    /// bypass the suppression window.
    Error,
    /// Thread count exceeded its threshold.
    ThreadCount,
}

impl AlertPolicy {
    /// Short label for the metric kind, used in pattern keys and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AlertPolicy::ElapsedTime { .. } => "elapsed",
            AlertPolicy::GcTime => "gc_time",
            AlertPolicy::Error => "error",
            AlertPolicy::ThreadCount => "thread_count",
        }
    }

    /// Whether the condition class alerts even inside the suppression window.
    pub fn always_urgent(&self) -> bool {
        matches!(self, AlertPolicy::Error)
    }

    /// Rejects metric values the policy cannot work with.
    ///
    /// Runs before any history mutation so a malformed observation leaves
    /// the condition's state exactly as it was.
    pub fn validate_metric(&self, context: &AlertContext) -> Result<(), EvaluationError> {
        match self {
            AlertPolicy::ThreadCount => Ok(()),
            AlertPolicy::ElapsedTime { .. } | AlertPolicy::GcTime | AlertPolicy::Error => context
                .metric_value
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| EvaluationError::MalformedMetric {
                    kind: self.kind(),
                    value: context.metric_value.clone(),
                }),
        }
    }

    /// Severity of the condition given how often it repeated while
    /// suppressed.
    pub fn severity(&self, context: &AlertContext, occurrence_count: u32) -> Severity {
        match self {
            AlertPolicy::Error => Severity::Error,
            AlertPolicy::ElapsedTime { rate_threshold } => {
                if occurrence_count == 0 {
                    return Severity::Info;
                }
                let per_minute =
                    f64::from(occurrence_count) / f64::from(context.interval_minutes.max(1));
                if per_minute >= f64::from(*rate_threshold) {
                    Severity::Fatal
                } else {
                    Severity::Warn
                }
            }
            AlertPolicy::GcTime => {
                if occurrence_count > 0 {
                    Severity::Fatal
                } else {
                    Severity::Info
                }
            }
            AlertPolicy::ThreadCount => {
                if occurrence_count > 1 {
                    Severity::Fatal
                } else {
                    Severity::Info
                }
            }
        }
    }

    /// Whether an escalation-window notification at `severity` should be
    /// dropped instead of emitted.
    pub fn should_skip(&self, severity: Severity) -> bool {
        match self {
            AlertPolicy::ElapsedTime { .. } => severity == Severity::Info,
            AlertPolicy::GcTime | AlertPolicy::Error | AlertPolicy::ThreadCount => false,
        }
    }

    /// Notification headline.
    pub fn title(&self, context: &AlertContext) -> String {
        match self {
            AlertPolicy::ElapsedTime { .. } => "Elapsed time exceed a threshold.".to_owned(),
            AlertPolicy::GcTime => "GC time exceed a threshold.".to_owned(),
            AlertPolicy::ThreadCount => "Thread count exceed a threshold.".to_owned(),
            AlertPolicy::Error => {
                context.error_message.clone().unwrap_or_else(|| "Unknown error".to_owned())
            }
        }
    }

    /// Notification body, annotated with the suppressed repeat count.
    pub fn message(&self, context: &AlertContext, occurrence_count: u32) -> String {
        let suffix = repeat_suffix(occurrence_count);
        match self {
            AlertPolicy::ElapsedTime { .. } => format!(
                "({}) elapsed time({} ms) exceed a threshold{}",
                context.service_name.as_deref().unwrap_or("unknown service"),
                metric_display(context),
                suffix
            ),
            AlertPolicy::GcTime => format!(
                "{}'s GC time({} ms) exceed a threshold{}",
                context.object_name,
                metric_display(context),
                suffix
            ),
            AlertPolicy::ThreadCount => format!(
                "{}'s Thread count({}) exceed a threshold{}",
                context.object_name, context.metric_value, suffix
            ),
            AlertPolicy::Error => format!(
                "{} - {}{}",
                context.service_name.as_deref().unwrap_or("unknown service"),
                context.error_message.as_deref().unwrap_or("Unknown error"),
                suffix
            ),
        }
    }
}

/// `" (+N)"` when repeats were suppressed, empty otherwise.
fn repeat_suffix(occurrence_count: u32) -> String {
    if occurrence_count > 0 {
        format!(" (+{occurrence_count})")
    } else {
        String::new()
    }
}

/// Thousands-grouped rendering of the metric value; falls back to the raw
/// string when it is not numeric.
fn metric_display(context: &AlertContext) -> String {
    context
        .metric_value
        .parse::<i64>()
        .map(group_digits)
        .unwrap_or_else(|_| context.metric_value.clone())
}

fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
