//! Directions API wire models
//!
//! Deserialization targets for the subset of the Directions JSON body the
//! tracker reads: route legs, their ordered steps, and the transit details
//! of a step. Unknown fields are ignored; missing lists default to empty
//! so a structurally thin response still deserializes.

use serde::Deserialize;

/// Travel mode marker for transit steps
pub const TRAVEL_MODE_TRANSIT: &str = "TRANSIT";

/// Top-level Directions response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsResponse {
    /// API status field ("OK" on success)
    #[serde(default)]
    pub status: String,
    /// Suggested routes, best first
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Error detail accompanying a non-OK status
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One suggested route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    /// Route legs; a single-destination request yields one
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// A leg of a route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leg {
    /// Total leg duration
    #[serde(default)]
    pub duration: Option<DurationValue>,
    /// Ordered steps making up the leg
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A single step within a leg
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Step {
    /// Travel mode (e.g. "WALKING", "TRANSIT")
    #[serde(default)]
    pub travel_mode: String,
    /// Present only on transit steps
    #[serde(default)]
    pub transit_details: Option<TransitDetails>,
}

/// Transit-specific details of a step
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitDetails {
    /// Boarding stop
    #[serde(default)]
    pub departure_stop: Option<NamedStop>,
    /// Alighting stop
    #[serde(default)]
    pub arrival_stop: Option<NamedStop>,
    /// Line served by this step
    #[serde(default)]
    pub line: Option<TransitLine>,
    /// Scheduled departure
    #[serde(default)]
    pub departure_time: Option<EpochTime>,
    /// Scheduled arrival
    #[serde(default)]
    pub arrival_time: Option<EpochTime>,
}

/// A named transit stop
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedStop {
    /// Human-readable stop name
    #[serde(default)]
    pub name: Option<String>,
}

/// Transit line descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitLine {
    /// Full line name
    #[serde(default)]
    pub name: Option<String>,
    /// Short name, typically the bus number
    #[serde(default)]
    pub short_name: Option<String>,
}

/// Duration in seconds as the API encodes it
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DurationValue {
    /// Seconds
    #[serde(default)]
    pub value: i64,
}

/// A point in time as the API encodes it
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EpochTime {
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_response() {
        let json = r#"{
            "status": "OK",
            "routes": [{
                "legs": [{
                    "duration": { "value": 600, "text": "10 mins" },
                    "steps": [
                        { "travel_mode": "WALKING" },
                        {
                            "travel_mode": "TRANSIT",
                            "transit_details": {
                                "departure_stop": { "name": "Station Noord" },
                                "arrival_stop": { "name": "Centraal Station" },
                                "line": { "name": "Bus 45 naar Centrum", "short_name": "45" },
                                "departure_time": { "value": 1700000000, "text": "14:13" },
                                "arrival_time": { "value": 1700000600 }
                            }
                        }
                    ]
                }]
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "OK");
        let leg = &response.routes[0].legs[0];
        assert_eq!(leg.duration.unwrap().value, 600);
        assert_eq!(leg.steps.len(), 2);
        assert_eq!(leg.steps[1].travel_mode, TRAVEL_MODE_TRANSIT);
        let details = leg.steps[1].transit_details.as_ref().unwrap();
        assert_eq!(details.line.as_ref().unwrap().short_name.as_deref(), Some("45"));
        assert_eq!(details.departure_time.unwrap().value, 1_700_000_000);
    }

    #[test]
    fn deserializes_error_body() {
        let json = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "routes": []
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "REQUEST_DENIED");
        assert!(response.routes.is_empty());
        assert!(response.error_message.is_some());
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let response: DirectionsResponse = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert!(response.routes.is_empty());
    }
}
