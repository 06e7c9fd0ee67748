//! Bus-arrival snapshot entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The latest extracted bus-arrival facts for one tracked route
///
/// Every field is independently optional: a refresh that found no
/// usable transit step publishes an all-absent snapshot rather than
/// failing. Display sensors read individual fields and render absent
/// values as unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusSnapshot {
    /// Name of the departure stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_name: Option<String>,
    /// Name of the arrival stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_stop_name: Option<String>,
    /// Full line name (e.g. "Bus 45 to Central Station")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_name: Option<String>,
    /// Short line number (e.g. "45")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<String>,
    /// Next departure from the departure stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_departure: Option<DateTime<Utc>>,
    /// Arrival at the destination stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime<Utc>>,
    /// Total leg duration in whole minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

impl BusSnapshot {
    /// A snapshot with every field absent
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no field carries a value
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stop_name.is_none()
            && self.arrival_stop_name.is_none()
            && self.line_name.is_none()
            && self.line_number.is_none()
            && self.next_departure.is_none()
            && self.arrival_time.is_none()
            && self.duration_minutes.is_none()
    }
}
