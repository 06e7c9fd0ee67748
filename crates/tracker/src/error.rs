//! Tracker-level errors

use domain::{DomainError, RouteId};
use thiserror::Error;

/// Outcome of a failed refresh attempt
///
/// Cloneable so every caller coalesced onto one in-flight refresh can
/// receive the same result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The upstream fetch failed; the coordinator stays alive and the
    /// snapshot was reset per the configured failure policy
    #[error("Directions fetch failed: {0}")]
    FetchFailed(String),

    /// The coordinator has been shut down
    #[error("Coordinator is stopped")]
    Stopped,

    /// The in-flight refresh was abandoned before completing
    #[error("Refresh was cancelled before completing")]
    Cancelled,
}

/// Errors that can occur in the tracking layer
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Request failed boundary validation
    #[error(transparent)]
    InvalidRequest(#[from] DomainError),

    /// Service configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A route's blocking first refresh failed, so it was not activated
    #[error("Activation of route {route_id} failed: {source}")]
    Activation {
        /// The route that could not be activated
        route_id: RouteId,
        /// The underlying refresh failure
        source: RefreshError,
    },
}
