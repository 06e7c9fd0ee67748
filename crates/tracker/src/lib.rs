//! Route polling coordination for the bus tracker
//!
//! The application layer between the host automation platform and the
//! Directions integration. One [`RouteCoordinator`] per tracked route
//! polls the API on a fixed interval with single-flight refresh
//! semantics and fans the latest [`domain::BusSnapshot`] out to
//! [`RouteSensor`] display adapters over a watch channel. The
//! [`RouteRegistry`] owns the live coordinators and serializes runtime
//! track/untrack/reload operations, which the host invokes through the
//! [`CommandDispatcher`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use integration_directions::{DirectionsConfig, GoogleDirectionsClient};
//! use tracker::{RouteRegistry, TrackerConfig};
//!
//! let config = TrackerConfig::from_toml_str(&std::fs::read_to_string("tracker.toml")?)?;
//! let client = Arc::new(GoogleDirectionsClient::new(DirectionsConfig::new(&config.api_key))?);
//! let registry = RouteRegistry::from_config(&config, client).await?;
//! ```

pub mod commands;
pub mod config;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod registry;
pub mod testing;

pub use commands::{CommandDispatcher, CommandOutcome, TrackerCommand};
pub use config::{RouteEntry, TrackerConfig};
pub use coordinator::{CoordinatorOptions, RouteCoordinator};
pub use entity::{RouteSensor, SensorKind, SensorValue, SnapshotField, sensors_for};
pub use error::{RefreshError, TrackerError};
pub use registry::{ReloadSummary, RouteRegistry, TrackOutcome, UntrackOutcome};
