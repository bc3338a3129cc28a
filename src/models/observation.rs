//! Typed observation records consumed by the intake layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed service call as reported by the APM backend, carrying the
/// two signals the intake inspects: elapsed time and an error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanObservation {
    /// Hash of the object that served the call.
    pub object_hash: i64,

    /// Backend identifier of the service endpoint.
    pub service_id: i64,

    /// Resolved display name of the service endpoint.
    pub service_name: String,

    /// Wall-clock duration of the call in milliseconds.
    pub elapsed_ms: i64,

    /// Backend error code; zero means the call succeeded.
    pub error_code: i64,

    /// Resolved error text, when the backend already looked it up.
    pub error_message: Option<String>,

    /// When the call finished.
    pub end_time: DateTime<Utc>,
}

/// One garbage-collection counter sample for an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcSample {
    /// Hash of the sampled object.
    pub object_hash: i64,

    /// Accumulated GC time in the sampling period, milliseconds.
    pub gc_time_ms: i64,

    /// Whether this is a realtime sample; aggregated replays are ignored.
    pub realtime: bool,
}
