//! Google Maps Directions client
//!
//! One HTTP GET per fetch, transit mode with a bus preference and
//! `departure_time=now` so the API answers with real-time data.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use parking_lot::Mutex;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::DirectionsConfig;
use crate::error::DirectionsError;
use crate::models::DirectionsResponse;

/// API status value of a successful response body
const STATUS_OK: &str = "OK";

/// Trait for transit-directions providers
#[async_trait]
pub trait DirectionsApi: Send + Sync {
    /// Fetch directions between two coordinate pairs
    ///
    /// `route_label` is log/trace context only; it is never sent upstream.
    /// The transit step list is filtered downstream by the extractor.
    async fn fetch_directions(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
        route_label: &str,
    ) -> Result<DirectionsResponse, DirectionsError>;
}

/// Directions API client with a lazily-created, reusable HTTP session
///
/// The underlying `reqwest::Client` is built on first use and shared by
/// every subsequent fetch. [`GoogleDirectionsClient::shutdown`] drops it,
/// releasing pooled connections; a fetch after shutdown lazily recreates
/// the session.
#[derive(Debug)]
pub struct GoogleDirectionsClient {
    config: DirectionsConfig,
    session: Mutex<Option<Client>>,
}

impl GoogleDirectionsClient {
    /// Create a new Directions client
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the configuration fails validation.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        config.validate().map_err(DirectionsError::InvalidRequest)?;

        Ok(Self {
            config,
            session: Mutex::new(None),
        })
    }

    /// Release the HTTP session and its pooled connections
    ///
    /// Idempotent. The next fetch recreates the session.
    pub fn shutdown(&self) {
        if self.session.lock().take().is_some() {
            debug!("directions HTTP session released");
        }
    }

    /// Get or lazily create the shared HTTP session
    fn session(&self) -> Result<Client, DirectionsError> {
        let mut session = self.session.lock();
        if let Some(client) = session.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .user_agent("bustracker/0.2")
            .build()
            .map_err(|e| DirectionsError::ConnectionFailed(e.to_string()))?;

        *session = Some(client.clone());
        Ok(client)
    }
}

#[async_trait]
impl DirectionsApi for GoogleDirectionsClient {
    #[instrument(skip(self), fields(route = %route_label, origin = %origin, destination = %destination))]
    async fn fetch_directions(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
        route_label: &str,
    ) -> Result<DirectionsResponse, DirectionsError> {
        if route_label.trim().is_empty() {
            return Err(DirectionsError::InvalidRequest(
                "route label must not be empty".to_string(),
            ));
        }

        let session = self.session()?;
        let url = format!("{}/directions/json", self.config.base_url);

        let params = [
            ("origin", origin.as_query()),
            ("destination", destination.as_query()),
            ("mode", "transit".to_string()),
            ("transit_mode", "bus".to_string()),
            ("departure_time", "now".to_string()),
            ("key", self.config.api_key.clone()),
        ];

        debug!(?url, "Fetching directions");

        let response = session
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DirectionsError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    DirectionsError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectionsError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        if parsed.status != STATUS_OK {
            return Err(DirectionsError::ApiStatus {
                status: parsed.status,
                message: parsed.error_message,
            });
        }

        debug!(routes = parsed.routes.len(), "Directions fetched");
        Ok(parsed)
    }
}
