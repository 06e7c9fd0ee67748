//! Test fixtures for the tracking layer
//!
//! A scripted stand-in for the Directions API so coordinator and registry
//! behavior can be driven without a network: results play back from a
//! queue, fetches can be held in flight behind a gate, and every call is
//! counted.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use domain::GeoLocation;
use integration_directions::{
    DirectionsApi, DirectionsError, DirectionsResponse, DurationValue, EpochTime, Leg, NamedStop,
    Route, Step, TransitDetails, TransitLine,
};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

/// Scripted Directions API double
///
/// Pops one programmed result per fetch; an empty queue yields
/// [`ScriptedDirectionsApi::sample_response`]. A gated instance holds
/// every fetch until [`release`](Self::release)d, which is how tests pin
/// a refresh in flight.
#[derive(Debug)]
pub struct ScriptedDirectionsApi {
    script: Mutex<VecDeque<Result<DirectionsResponse, String>>>,
    calls: AtomicUsize,
    entered: Semaphore,
    gate: Semaphore,
    gated: bool,
}

impl ScriptedDirectionsApi {
    /// An ungated double answering with sample responses
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            entered: Semaphore::new(0),
            gate: Semaphore::new(0),
            gated: false,
        })
    }

    /// A double whose fetches block until released
    #[must_use]
    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            entered: Semaphore::new(0),
            gate: Semaphore::new(0),
            gated: true,
        })
    }

    /// Queue a response for an upcoming fetch
    pub fn push_response(&self, response: DirectionsResponse) {
        self.script.lock().push_back(Ok(response));
    }

    /// Queue a connection failure for an upcoming fetch
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script.lock().push_back(Err(message.into()));
    }

    /// Wait until one more fetch has entered the client
    pub async fn fetch_entered(&self) {
        if let Ok(permit) = self.entered.acquire().await {
            permit.forget();
        }
    }

    /// Let `n` gated fetches proceed
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// Number of fetches issued so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A realistic OK response with one walking and one transit step
    #[must_use]
    pub fn sample_response() -> DirectionsResponse {
        DirectionsResponse {
            status: "OK".to_string(),
            routes: vec![Route {
                legs: vec![Leg {
                    duration: Some(DurationValue { value: 600 }),
                    steps: vec![
                        Step {
                            travel_mode: "WALKING".to_string(),
                            transit_details: None,
                        },
                        Step {
                            travel_mode: "TRANSIT".to_string(),
                            transit_details: Some(TransitDetails {
                                departure_stop: Some(NamedStop {
                                    name: Some("Station Noord".to_string()),
                                }),
                                arrival_stop: Some(NamedStop {
                                    name: Some("Centraal Station".to_string()),
                                }),
                                line: Some(TransitLine {
                                    name: Some("Bus 45 naar Centrum".to_string()),
                                    short_name: Some("45".to_string()),
                                }),
                                departure_time: Some(EpochTime {
                                    value: 1_700_000_000,
                                }),
                                arrival_time: Some(EpochTime {
                                    value: 1_700_000_600,
                                }),
                            }),
                        },
                    ],
                }],
            }],
            error_message: None,
        }
    }
}

#[async_trait]
impl DirectionsApi for ScriptedDirectionsApi {
    async fn fetch_directions(
        &self,
        _origin: &GeoLocation,
        _destination: &GeoLocation,
        _route_label: &str,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.add_permits(1);

        if self.gated {
            match self.gate.acquire().await {
                Ok(permit) => permit.forget(),
                Err(_) => {
                    return Err(DirectionsError::ConnectionFailed(
                        "gate closed".to_string(),
                    ));
                }
            }
        }

        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(DirectionsError::ConnectionFailed(message)),
            None => Ok(Self::sample_response()),
        }
    }
}
