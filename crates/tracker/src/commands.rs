//! Runtime command dispatch
//!
//! The host invokes track/untrack/reload through this dispatcher, which
//! holds an explicit registry reference — no ambient globals, no
//! closure-captured state. Raw command input is validated here, before
//! any coordinator is created.

use std::sync::Arc;

use domain::{RouteId, TrackingRequest};
use serde::{Deserialize, Serialize};

use crate::config::RouteEntry;
use crate::error::TrackerError;
use crate::registry::{RouteRegistry, TrackOutcome, UntrackOutcome};

/// A runtime command from the host environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TrackerCommand {
    /// Start tracking a route
    Track {
        /// Registry key for the new route
        route_id: String,
        /// Origin as `"lat,lon"`
        origin: String,
        /// Destination as `"lat,lon"`
        destination: String,
    },
    /// Stop tracking a route
    Untrack {
        /// Registry key of the route to remove
        route_id: String,
    },
    /// Replace the tracked set with the given routes
    Reload {
        /// The new route set
        routes: Vec<RouteEntry>,
    },
}

/// What a dispatched command did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Route activated and inserted
    Tracked,
    /// Route was already present; no-op
    AlreadyTracked,
    /// Route removed
    Untracked,
    /// Route was not present; no-op
    NotTracked,
    /// Tracked set replaced
    Reloaded {
        /// Routes activated
        tracked: usize,
        /// Routes that failed activation
        failed: usize,
    },
}

/// Maps host commands onto registry operations
#[derive(Debug)]
pub struct CommandDispatcher {
    registry: Arc<RouteRegistry>,
}

impl CommandDispatcher {
    /// Create a dispatcher over the given registry
    #[must_use]
    pub const fn new(registry: Arc<RouteRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher operates on
    #[must_use]
    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// Validate and execute one command
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidRequest` for malformed input and
    /// `TrackerError::Activation` when a tracked route's first refresh
    /// fails. `AlreadyTracked`/`NotTracked` are outcomes, not errors.
    pub async fn dispatch(&self, command: TrackerCommand) -> Result<CommandOutcome, TrackerError> {
        match command {
            TrackerCommand::Track {
                route_id,
                origin,
                destination,
            } => {
                let request = TrackingRequest::parse(&route_id, &origin, &destination)?;
                match self.registry.track(request).await? {
                    TrackOutcome::Tracked => Ok(CommandOutcome::Tracked),
                    TrackOutcome::AlreadyTracked => Ok(CommandOutcome::AlreadyTracked),
                }
            }
            TrackerCommand::Untrack { route_id } => {
                let route_id = RouteId::new(route_id).map_err(TrackerError::InvalidRequest)?;
                match self.registry.untrack(&route_id).await {
                    UntrackOutcome::Untracked => Ok(CommandOutcome::Untracked),
                    UntrackOutcome::NotTracked => Ok(CommandOutcome::NotTracked),
                }
            }
            TrackerCommand::Reload { routes } => {
                // Validate the whole set before touching the registry.
                let mut requests = Vec::with_capacity(routes.len());
                for entry in &routes {
                    requests.push(entry.to_request()?);
                }
                let summary = self.registry.reload(requests).await;
                Ok(CommandOutcome::Reloaded {
                    tracked: summary.tracked,
                    failed: summary.failures.len(),
                })
            }
        }
    }
}
