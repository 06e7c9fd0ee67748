//! Route registry
//!
//! The live collection of active coordinators, keyed by route
//! identifier. Track and untrack serialize on the registry's async
//! mutex, which stays held across the blocking first refresh so two
//! concurrent `track` calls for one identifier can never produce two
//! coordinators.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use domain::{BusSnapshot, RouteId, TrackingRequest};
use integration_directions::DirectionsApi;
use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::coordinator::{CoordinatorOptions, RouteCoordinator};
use crate::entity::{RouteSensor, sensors_for};
use crate::error::TrackerError;

/// Result of a `track` operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The route was activated and inserted
    Tracked,
    /// A coordinator for this identifier already exists; nothing changed
    AlreadyTracked,
}

/// Result of an `untrack` operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntrackOutcome {
    /// The route was removed and its coordinator shut down
    Untracked,
    /// No such route; nothing changed
    NotTracked,
}

/// Outcome counts of a `reload` operation
#[derive(Debug, Default)]
pub struct ReloadSummary {
    /// Routes activated by the reload
    pub tracked: usize,
    /// Activation errors for routes that could not be tracked
    pub failures: Vec<TrackerError>,
}

struct TrackedRoute {
    coordinator: Arc<RouteCoordinator>,
    sensors: Vec<RouteSensor>,
}

/// The live collection of active route coordinators
pub struct RouteRegistry {
    client: Arc<dyn DirectionsApi>,
    options: CoordinatorOptions,
    routes: tokio::sync::Mutex<HashMap<RouteId, TrackedRoute>>,
}

impl RouteRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new(client: Arc<dyn DirectionsApi>, options: CoordinatorOptions) -> Self {
        Self {
            client,
            options,
            routes: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Validate a service configuration and track its routes
    ///
    /// Aborts on the first route that fails activation, shutting down
    /// everything already started, so the host can mark the integration
    /// unavailable and retry the whole setup.
    ///
    /// # Errors
    ///
    /// Returns the configuration or activation error that stopped setup.
    pub async fn from_config(
        config: &TrackerConfig,
        client: Arc<dyn DirectionsApi>,
    ) -> Result<Self, TrackerError> {
        config.validate()?;

        let registry = Self::new(client, CoordinatorOptions::from_config(config));
        for entry in &config.routes {
            let request = entry.to_request()?;
            if let Err(err) = registry.track(request).await {
                registry.shutdown_all().await;
                return Err(err);
            }
        }
        Ok(registry)
    }

    /// Start tracking a route
    ///
    /// Runs the new coordinator's blocking first refresh before the
    /// route is considered active; a first-refresh failure aborts
    /// activation and nothing is inserted.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Activation` when the first refresh fails.
    pub async fn track(&self, request: TrackingRequest) -> Result<TrackOutcome, TrackerError> {
        let mut routes = self.routes.lock().await;
        if routes.contains_key(&request.route_id) {
            return Ok(TrackOutcome::AlreadyTracked);
        }

        let route_id = request.route_id.clone();
        info!(route = %route_id, "Tracking route");

        let coordinator = Arc::new(RouteCoordinator::new(
            request,
            Arc::clone(&self.client),
            self.options,
        ));

        if let Err(source) = coordinator.refresh().await {
            coordinator.shutdown();
            return Err(TrackerError::Activation { route_id, source });
        }

        let sensors = sensors_for(&coordinator);
        coordinator.start();
        routes.insert(route_id, TrackedRoute {
            coordinator,
            sensors,
        });
        Ok(TrackOutcome::Tracked)
    }

    /// Stop tracking a route
    ///
    /// Removes the route's display sensors and shuts its coordinator
    /// down. Untracking an unknown identifier is a no-op.
    pub async fn untrack(&self, route_id: &RouteId) -> UntrackOutcome {
        let mut routes = self.routes.lock().await;
        match routes.remove(route_id) {
            Some(entry) => {
                info!(route = %route_id, "Untracking route");
                entry.coordinator.shutdown();
                UntrackOutcome::Untracked
            }
            None => UntrackOutcome::NotTracked,
        }
    }

    /// Replace the active route set with the given one
    ///
    /// Every current route is untracked, then each request is tracked in
    /// turn; activation failures are collected rather than aborting the
    /// remainder.
    pub async fn reload(&self, requests: Vec<TrackingRequest>) -> ReloadSummary {
        {
            let mut routes = self.routes.lock().await;
            for (route_id, entry) in routes.drain() {
                info!(route = %route_id, "Untracking route for reload");
                entry.coordinator.shutdown();
            }
        }

        let mut summary = ReloadSummary::default();
        for request in requests {
            match self.track(request).await {
                Ok(_) => summary.tracked += 1,
                Err(err) => {
                    warn!(error = %err, "Route activation failed during reload");
                    summary.failures.push(err);
                }
            }
        }
        summary
    }

    /// Shut down every coordinator and clear the registry
    pub async fn shutdown_all(&self) {
        let mut routes = self.routes.lock().await;
        for (route_id, entry) in routes.drain() {
            info!(route = %route_id, "Untracking route");
            entry.coordinator.shutdown();
        }
    }

    /// Whether a route is currently tracked
    pub async fn contains(&self, route_id: &RouteId) -> bool {
        self.routes.lock().await.contains_key(route_id)
    }

    /// Number of tracked routes
    pub async fn len(&self) -> usize {
        self.routes.lock().await.len()
    }

    /// True when nothing is tracked
    pub async fn is_empty(&self) -> bool {
        self.routes.lock().await.is_empty()
    }

    /// Identifiers of all tracked routes
    pub async fn route_ids(&self) -> Vec<RouteId> {
        self.routes.lock().await.keys().cloned().collect()
    }

    /// The latest snapshot for a tracked route
    pub async fn snapshot(&self, route_id: &RouteId) -> Option<BusSnapshot> {
        self.routes
            .lock()
            .await
            .get(route_id)
            .map(|entry| entry.coordinator.snapshot())
    }

    /// The display sensors of a tracked route
    pub async fn sensors(&self, route_id: &RouteId) -> Option<Vec<RouteSensor>> {
        self.routes
            .lock()
            .await
            .get(route_id)
            .map(|entry| entry.sensors.clone())
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
