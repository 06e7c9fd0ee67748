//! Google Maps Directions integration for the bus tracker
//!
//! Wraps the [Directions API](https://developers.google.com/maps/documentation/directions)
//! for transit routing with a bus preference and `depart now` semantics,
//! and extracts per-route bus-arrival snapshots from its responses.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern: [`DirectionsApi`] defines the
//! fetch interface, implemented by [`GoogleDirectionsClient`]. Responses
//! deserialize into the wire models of [`models`]; the pure
//! [`extract::snapshot_from_response`] turns one response into a
//! [`domain::BusSnapshot`] and never fails.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoLocation;
//! use integration_directions::{DirectionsApi, DirectionsConfig, GoogleDirectionsClient};
//!
//! let config = DirectionsConfig::new("my-api-key");
//! let client = GoogleDirectionsClient::new(config)?;
//!
//! let response = client.fetch_directions(
//!     &GeoLocation::new(52.37, 4.89)?,  // Amsterdam origin
//!     &GeoLocation::new(52.31, 4.94)?,  // destination
//!     "45",                             // route label for log context
//! ).await?;
//! let snapshot = integration_directions::extract::snapshot_from_response(&response);
//! ```

mod client;
mod config;
mod error;
pub mod extract;
mod models;

pub use client::{DirectionsApi, GoogleDirectionsClient};
pub use config::DirectionsConfig;
pub use error::DirectionsError;
pub use models::{
    DirectionsResponse, DurationValue, EpochTime, Leg, NamedStop, Route, Step, TransitDetails,
    TransitLine,
};
