//! Tracking request command object

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{GeoLocation, RouteId};

/// A validated request to start tracking one origin→destination route
///
/// Construction is the validation boundary: raw coordinates and route
/// identifiers from host commands or configuration are checked here,
/// before any coordinator is created for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRequest {
    /// Registry key for the route
    pub route_id: RouteId,
    /// Trip origin
    pub origin: GeoLocation,
    /// Trip destination
    pub destination: GeoLocation,
}

impl TrackingRequest {
    /// Create a request from already-validated parts
    #[must_use]
    pub const fn new(route_id: RouteId, origin: GeoLocation, destination: GeoLocation) -> Self {
        Self {
            route_id,
            origin,
            destination,
        }
    }

    /// Parse a request from the raw string form used by host commands
    /// (`route_id`, `"lat,lon"`, `"lat,lon"`)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRouteId` for an empty identifier, or
    /// `DomainError::InvalidCoordinates` naming the offending field when
    /// either coordinate pair fails to parse or is out of range
    pub fn parse(route_id: &str, origin: &str, destination: &str) -> Result<Self, DomainError> {
        let route_id = RouteId::new(route_id)?;
        let origin = GeoLocation::parse(origin)
            .map_err(|_| DomainError::invalid_coordinates("origin", origin))?;
        let destination = GeoLocation::parse(destination)
            .map_err(|_| DomainError::invalid_coordinates("destination", destination))?;
        Ok(Self::new(route_id, origin, destination))
    }
}
