//! Display-sensor adapters
//!
//! Composition over the coordinator's snapshot channel: each sensor
//! pairs one snapshot field with a cloned watch receiver and renders it
//! through the small [`SnapshotField`] interface. The host's entity
//! machinery consumes these adapters; nothing here inherits from it.

use chrono::{DateTime, Utc};
use domain::{BusSnapshot, RouteId};
use tokio::sync::watch;

use crate::coordinator::RouteCoordinator;

/// Which snapshot field a display sensor renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Next departure from the origin stop
    NextDeparture,
    /// Arrival at the destination stop
    ArrivalTime,
    /// Trip duration in minutes
    Duration,
    /// Departure stop name
    StopName,
    /// Short line number
    LineNumber,
}

impl SensorKind {
    /// The standard sensor set published per tracked route
    pub const ALL: [Self; 5] = [
        Self::NextDeparture,
        Self::ArrivalTime,
        Self::Duration,
        Self::StopName,
        Self::LineNumber,
    ];

    /// Stable key used in unique ids
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NextDeparture => "next_departure",
            Self::ArrivalTime => "arrival_time",
            Self::Duration => "duration",
            Self::StopName => "stop_name",
            Self::LineNumber => "line_number",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NextDeparture => "Next Departure",
            Self::ArrivalTime => "Arrival Time",
            Self::Duration => "Duration",
            Self::StopName => "Stop Name",
            Self::LineNumber => "Line Number",
        }
    }
}

/// A value rendered by a display sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorValue {
    /// An absolute point in time; presentation (time zone, format) is the
    /// display layer's concern
    Timestamp(DateTime<Utc>),
    /// A duration in whole minutes
    Minutes(i64),
    /// A plain text value
    Text(String),
}

/// Read access to one field of a route's latest snapshot
pub trait SnapshotField {
    /// The field this sensor renders
    fn kind(&self) -> SensorKind;

    /// The current value, absent when the snapshot lacks the field
    fn value(&self) -> Option<SensorValue>;
}

/// Display-sensor adapter bound to one route and one snapshot field
#[derive(Debug, Clone)]
pub struct RouteSensor {
    route_id: RouteId,
    kind: SensorKind,
    receiver: watch::Receiver<BusSnapshot>,
}

impl RouteSensor {
    /// Create a sensor subscribed to the coordinator's snapshot channel
    #[must_use]
    pub fn new(coordinator: &RouteCoordinator, kind: SensorKind) -> Self {
        Self {
            route_id: coordinator.route_id().clone(),
            kind,
            receiver: coordinator.subscribe(),
        }
    }

    /// Identifier of the route this sensor belongs to
    #[must_use]
    pub const fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    /// Stable unique id, `{route}_{field}`
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.route_id, self.kind.key())
    }

    /// Display name, `Bus {route} {label}`
    #[must_use]
    pub fn name(&self) -> String {
        format!("Bus {} {}", self.route_id, self.kind.label())
    }

    /// Context attributes published alongside the state
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, Option<String>)> {
        let snapshot = self.receiver.borrow().clone();
        vec![
            ("departure_stop", snapshot.stop_name),
            ("arrival_stop", snapshot.arrival_stop_name),
            ("line_name", snapshot.line_name),
            ("line_number", snapshot.line_number),
        ]
    }

    /// Wait for the next snapshot update
    ///
    /// Returns false once the coordinator is gone and no further updates
    /// can arrive.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

impl SnapshotField for RouteSensor {
    fn kind(&self) -> SensorKind {
        self.kind
    }

    fn value(&self) -> Option<SensorValue> {
        let snapshot = self.receiver.borrow();
        match self.kind {
            SensorKind::NextDeparture => snapshot.next_departure.map(SensorValue::Timestamp),
            SensorKind::ArrivalTime => snapshot.arrival_time.map(SensorValue::Timestamp),
            SensorKind::Duration => snapshot.duration_minutes.map(SensorValue::Minutes),
            SensorKind::StopName => snapshot.stop_name.clone().map(SensorValue::Text),
            SensorKind::LineNumber => snapshot.line_number.clone().map(SensorValue::Text),
        }
    }
}

/// Build the standard sensor set for a coordinator
#[must_use]
pub fn sensors_for(coordinator: &RouteCoordinator) -> Vec<RouteSensor> {
    SensorKind::ALL
        .into_iter()
        .map(|kind| RouteSensor::new(coordinator, kind))
        .collect()
}
