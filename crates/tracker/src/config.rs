//! Tracker service configuration

use std::collections::HashSet;

use domain::TrackingRequest;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Configuration accepted from the host at setup
///
/// Carries the static API credential, the polling policy, and the
/// initial route set (a single entry or a bulk import list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Directions API credential, required and non-empty
    pub api_key: String,

    /// Seconds between scheduled refreshes per route
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Keep the last-known snapshot through fetch failures instead of
    /// resetting it to empty
    #[serde(default)]
    pub retain_last_known: bool,

    /// Routes to track at startup
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One configured route in raw string form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Registry key, e.g. the bus line number
    pub route_id: String,
    /// Origin as `"lat,lon"`
    pub origin: String,
    /// Destination as `"lat,lon"`
    pub destination: String,
}

impl RouteEntry {
    /// Validate and convert into a tracking request
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidRequest` when the identifier or
    /// either coordinate pair fails validation.
    pub fn to_request(&self) -> Result<TrackingRequest, TrackerError> {
        Ok(TrackingRequest::parse(
            &self.route_id,
            &self.origin,
            &self.destination,
        )?)
    }
}

const fn default_refresh_interval_secs() -> u64 {
    60
}

impl TrackerConfig {
    /// Create a configuration with the given API key and no routes
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            refresh_interval_secs: default_refresh_interval_secs(),
            retain_last_known: false,
            routes: Vec::new(),
        }
    }

    /// Parse a configuration from TOML
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Configuration` on malformed TOML or any
    /// validation failure.
    pub fn from_toml_str(raw: &str) -> Result<Self, TrackerError> {
        let config: Self =
            toml::from_str(raw).map_err(|e| TrackerError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Rejects a missing credential, a zero interval, duplicate route
    /// identifiers, and unparseable coordinates — all before any
    /// coordinator is created.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Configuration` or
    /// `TrackerError::InvalidRequest` naming the first violation.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.api_key.trim().is_empty() {
            return Err(TrackerError::Configuration(
                "api_key must not be empty".to_string(),
            ));
        }

        if self.refresh_interval_secs == 0 {
            return Err(TrackerError::Configuration(
                "refresh_interval_secs must be greater than 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.routes {
            let request = entry.to_request()?;
            if !seen.insert(request.route_id.clone()) {
                return Err(TrackerError::Configuration(format!(
                    "duplicate route_id in configuration: {}",
                    request.route_id
                )));
            }
        }

        Ok(())
    }
}
