//! Serde helpers for `Duration` fields expressed in whole seconds.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// Deserializes a `Duration` from a plain seconds integer.
pub fn deserialize_duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

/// Serializes a `Duration` as a plain seconds integer.
pub fn serialize_duration_to_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Wrapper {
        #[serde(
            deserialize_with = "deserialize_duration_from_secs",
            serialize_with = "serialize_duration_to_secs"
        )]
        interval: Duration,
    }

    #[test]
    fn round_trips_whole_seconds() {
        let parsed: Wrapper = serde_json::from_str(r#"{"interval": 5}"#).unwrap();
        assert_eq!(parsed.interval, Duration::from_secs(5));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"interval":5}"#);
    }
}
