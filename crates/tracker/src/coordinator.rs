//! Per-route polling coordinator
//!
//! One coordinator per tracked route drives the Directions client on a
//! fixed schedule, extracts a snapshot from each response, and publishes
//! it to subscribers over a watch channel. Refresh is single-flight:
//! concurrent triggers collapse onto one outstanding fetch and every
//! caller receives that fetch's result.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{BusSnapshot, GeoLocation, RouteId, TrackingRequest};
use integration_directions::{DirectionsApi, extract};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::error::RefreshError;

/// Default seconds between scheduled refreshes
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Polling policy for a coordinator
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorOptions {
    /// Time between scheduled refreshes
    pub refresh_interval: Duration,
    /// Keep the last-known snapshot through fetch failures instead of
    /// resetting it to empty
    pub retain_last_known: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            retain_last_known: false,
        }
    }
}

impl CoordinatorOptions {
    /// Derive options from the service configuration
    #[must_use]
    pub const fn from_config(config: &TrackerConfig) -> Self {
        Self {
            refresh_interval: Duration::from_secs(config.refresh_interval_secs),
            retain_last_known: config.retain_last_known,
        }
    }
}

/// Result a refresh shares with every coalesced caller
type RefreshResult = Result<(), RefreshError>;

/// The per-route polling/state unit
///
/// Created by the registry on `track`; lives until `untrack` or process
/// shutdown. The blocking first refresh is the registry's call, before
/// [`RouteCoordinator::start`] arms the schedule.
pub struct RouteCoordinator {
    inner: Arc<CoordinatorInner>,
    refresh_interval: Duration,
    schedule: Mutex<Option<JoinHandle<()>>>,
    shutdown_tx: watch::Sender<bool>,
}

struct CoordinatorInner {
    route_id: RouteId,
    origin: GeoLocation,
    destination: GeoLocation,
    client: Arc<dyn DirectionsApi>,
    retain_last_known: bool,
    snapshot_tx: watch::Sender<BusSnapshot>,
    last_refresh: Mutex<Option<DateTime<Utc>>>,
    /// In-flight marker: present while a refresh is outstanding; carries
    /// the channel coalesced callers wait on
    inflight: Mutex<Option<watch::Receiver<Option<RefreshResult>>>>,
    stopped: AtomicBool,
}

/// Clears the in-flight marker even when the leading refresh future is
/// dropped mid-fetch, so an abandoned leader can never wedge refreshes.
struct InflightClear<'a> {
    inner: &'a CoordinatorInner,
}

impl Drop for InflightClear<'_> {
    fn drop(&mut self) {
        *self.inner.inflight.lock() = None;
    }
}

enum RefreshRole {
    Leader(watch::Sender<Option<RefreshResult>>),
    Follower(watch::Receiver<Option<RefreshResult>>),
}

impl RouteCoordinator {
    /// Create a coordinator for a validated tracking request
    ///
    /// No fetch happens yet; the caller runs the blocking first
    /// [`refresh`](Self::refresh) and then [`start`](Self::start)s the
    /// schedule.
    #[must_use]
    pub fn new(
        request: TrackingRequest,
        client: Arc<dyn DirectionsApi>,
        options: CoordinatorOptions,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(BusSnapshot::empty());
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(CoordinatorInner {
                route_id: request.route_id,
                origin: request.origin,
                destination: request.destination,
                client,
                retain_last_known: options.retain_last_known,
                snapshot_tx,
                last_refresh: Mutex::new(None),
                inflight: Mutex::new(None),
                stopped: AtomicBool::new(false),
            }),
            refresh_interval: options.refresh_interval,
            schedule: Mutex::new(None),
            shutdown_tx,
        }
    }

    /// Refresh the route's snapshot now
    ///
    /// Single-flight: if a refresh is already outstanding this call
    /// coalesces onto it and returns its result; the client is invoked at
    /// most once per flight. A fetch failure is absorbed here — the
    /// snapshot is reset (or retained, per policy), the failure logged,
    /// and the error returned to the awaiting caller only.
    pub async fn refresh(&self) -> RefreshResult {
        self.inner.refresh().await
    }

    /// Arm the repeating scheduled refresh
    ///
    /// The first tick fires one full interval from now; the blocking
    /// first refresh has already run by then. Idempotent; a stopped
    /// coordinator stays stopped.
    pub fn start(&self) {
        let mut schedule = self.schedule.lock();
        if schedule.is_some() || self.inner.stopped.load(Ordering::SeqCst) {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let period = self.refresh_interval;

        let handle = tokio::spawn(async move {
            let mut ticks = time::interval_at(time::Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticks.tick() => {}
                    _ = shutdown_rx.changed() => break,
                }
                if inner.stopped.load(Ordering::SeqCst) {
                    break;
                }
                // Failure is logged and absorbed inside refresh; the
                // schedule keeps firing regardless.
                let _ = inner.refresh().await;
            }
            debug!(route = %inner.route_id, "Refresh schedule stopped");
        });

        *schedule = Some(handle);
    }

    /// Stop the coordinator
    ///
    /// Idempotent. Cancels future scheduled ticks; an in-flight fetch is
    /// not interrupted, but its result is discarded.
    pub fn shutdown(&self) {
        if self.inner.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(route = %self.inner.route_id, "Shutting down route coordinator");
        let _ = self.shutdown_tx.send(true);
    }

    /// Subscribe to snapshot updates
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BusSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// The snapshot most recently published
    #[must_use]
    pub fn snapshot(&self) -> BusSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// When the last successful refresh completed
    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_refresh.lock()
    }

    /// Whether `shutdown` has been called
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// The tracked route's identifier
    #[must_use]
    pub fn route_id(&self) -> &RouteId {
        &self.inner.route_id
    }

    /// Trip origin
    #[must_use]
    pub fn origin(&self) -> &GeoLocation {
        &self.inner.origin
    }

    /// Trip destination
    #[must_use]
    pub fn destination(&self) -> &GeoLocation {
        &self.inner.destination
    }
}

impl fmt::Debug for RouteCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteCoordinator")
            .field("route_id", &self.inner.route_id)
            .field("refresh_interval", &self.refresh_interval)
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}

impl CoordinatorInner {
    async fn refresh(&self) -> RefreshResult {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(RefreshError::Stopped);
        }

        let role = {
            let mut inflight = self.inflight.lock();
            if let Some(rx) = inflight.as_ref() {
                RefreshRole::Follower(rx.clone())
            } else {
                let (tx, rx) = watch::channel(None);
                *inflight = Some(rx);
                RefreshRole::Leader(tx)
            }
        };

        match role {
            RefreshRole::Follower(mut rx) => match rx.wait_for(Option::is_some).await {
                Ok(outcome) => (*outcome).clone().unwrap_or(Err(RefreshError::Cancelled)),
                Err(_) => Err(RefreshError::Cancelled),
            },
            RefreshRole::Leader(tx) => {
                let clear = InflightClear { inner: self };
                let result = self.fetch_and_publish().await;
                // Clear the marker before waking followers so a refresh
                // issued after completion starts a new flight.
                drop(clear);
                let _ = tx.send(Some(result.clone()));
                result
            }
        }
    }

    async fn fetch_and_publish(&self) -> RefreshResult {
        debug!(route = %self.route_id, "Refreshing route");

        match self
            .client
            .fetch_directions(&self.origin, &self.destination, self.route_id.as_str())
            .await
        {
            Ok(response) => {
                let snapshot = extract::snapshot_from_response(&response);
                if snapshot.is_empty() {
                    debug!(route = %self.route_id, "No transit step in directions response");
                }
                *self.last_refresh.lock() = Some(Utc::now());
                self.publish(snapshot);
                Ok(())
            }
            Err(err) => {
                warn!(route = %self.route_id, error = %err, "Directions fetch failed");
                if !self.retain_last_known {
                    self.publish(BusSnapshot::empty());
                }
                Err(RefreshError::FetchFailed(err.to_string()))
            }
        }
    }

    fn publish(&self, snapshot: BusSnapshot) {
        // A fetch that outlives shutdown completes, but its result is
        // discarded rather than published.
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        self.snapshot_tx.send_replace(snapshot);
    }
}
