//! Configuration for the alerting pipeline.

mod alert_settings;
mod app_config;
mod duration;

pub use alert_settings::{AlertSettings, AlertSettingsOverride};
pub use app_config::AppConfig;
pub use duration::{deserialize_duration_from_secs, serialize_duration_to_secs};
