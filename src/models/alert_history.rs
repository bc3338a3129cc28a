//! Per-condition repeat-tracking state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutable record of one alert condition's recent activity.
///
/// `occurrence_count` counts the repeats suppressed since `last_modified`;
/// it is zero whenever `last_modified` is refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertHistory {
    /// When the current window was opened or last reset.
    pub last_modified: DateTime<Utc>,
    /// Number of suppressed repeats observed since `last_modified`.
    pub occurrence_count: u32,
}

impl AlertHistory {
    /// Creates a fresh history with its window opened at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { last_modified: now, occurrence_count: 0 }
    }

    /// Records one more suppressed repeat and returns the updated count.
    pub fn record_repeat(&mut self) -> u32 {
        self.occurrence_count += 1;
        self.occurrence_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_history_starts_at_zero() {
        let now = Utc::now();
        let history = AlertHistory::new(now);
        assert_eq!(history.last_modified, now);
        assert_eq!(history.occurrence_count, 0);
    }

    #[test]
    fn record_repeat_increments_and_returns_count() {
        let mut history = AlertHistory::new(Utc::now());
        assert_eq!(history.record_repeat(), 1);
        assert_eq!(history.record_repeat(), 2);
        assert_eq!(history.occurrence_count, 2);
    }
}
