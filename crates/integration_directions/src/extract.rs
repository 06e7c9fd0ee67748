//! Snapshot extraction from a Directions response
//!
//! A pure mapping: structural mismatches yield an all-absent snapshot,
//! never an error. The coordinator calls this on every successful fetch.

use chrono::{DateTime, Utc};
use domain::BusSnapshot;

use crate::models::{DirectionsResponse, TRAVEL_MODE_TRANSIT};

/// Extract the bus-arrival snapshot from a Directions response
///
/// Takes the first route's first leg and scans its ordered steps for the
/// first one travelled in transit mode. Epoch values that fail timestamp
/// conversion leave the corresponding field absent.
#[must_use]
pub fn snapshot_from_response(response: &DirectionsResponse) -> BusSnapshot {
    let Some(leg) = response.routes.first().and_then(|route| route.legs.first()) else {
        return BusSnapshot::empty();
    };

    let Some(details) = leg
        .steps
        .iter()
        .find(|step| step.travel_mode == TRAVEL_MODE_TRANSIT)
        .and_then(|step| step.transit_details.as_ref())
    else {
        return BusSnapshot::empty();
    };

    BusSnapshot {
        stop_name: details
            .departure_stop
            .as_ref()
            .and_then(|stop| stop.name.clone()),
        arrival_stop_name: details
            .arrival_stop
            .as_ref()
            .and_then(|stop| stop.name.clone()),
        line_name: details.line.as_ref().and_then(|line| line.name.clone()),
        line_number: details
            .line
            .as_ref()
            .and_then(|line| line.short_name.clone()),
        next_departure: details.departure_time.and_then(|t| from_epoch(t.value)),
        arrival_time: details.arrival_time.and_then(|t| from_epoch(t.value)),
        duration_minutes: leg.duration.map(|d| d.value.div_euclid(60)),
    }
}

fn from_epoch(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}
