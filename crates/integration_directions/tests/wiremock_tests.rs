//! Integration tests for the Directions client (wiremock-based)

use domain::GeoLocation;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_directions::{
    DirectionsApi, DirectionsConfig, DirectionsError, GoogleDirectionsClient, extract,
};

fn origin() -> GeoLocation {
    GeoLocation::new(52.37, 4.89).unwrap()
}

fn destination() -> GeoLocation {
    GeoLocation::new(52.31, 4.94).unwrap()
}

const fn sample_directions_json() -> &'static str {
    r#"{
        "status": "OK",
        "routes": [{
            "legs": [{
                "duration": { "value": 600, "text": "10 mins" },
                "steps": [
                    {
                        "travel_mode": "WALKING",
                        "duration": { "value": 120 }
                    },
                    {
                        "travel_mode": "TRANSIT",
                        "transit_details": {
                            "departure_stop": { "name": "Station Noord" },
                            "arrival_stop": { "name": "Centraal Station" },
                            "line": { "name": "Bus 45 naar Centrum", "short_name": "45" },
                            "departure_time": { "value": 1700000000, "text": "14:13" },
                            "arrival_time": { "value": 1700000600, "text": "14:23" }
                        }
                    }
                ]
            }]
        }]
    }"#
}

#[tokio::test]
async fn test_fetch_directions_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .and(query_param("mode", "transit"))
        .and(query_param("transit_mode", "bus"))
        .and(query_param("departure_time", "now"))
        .and(query_param("key", "test-key"))
        .and(query_param("origin", "52.37,4.89"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_directions_json()))
        .mount(&server)
        .await;

    let config = DirectionsConfig::for_testing(server.uri());
    let client = GoogleDirectionsClient::new(config).unwrap();

    let response = client
        .fetch_directions(&origin(), &destination(), "45")
        .await
        .unwrap();

    assert_eq!(response.status, "OK");
    assert_eq!(response.routes.len(), 1);

    let snapshot = extract::snapshot_from_response(&response);
    assert_eq!(snapshot.stop_name.as_deref(), Some("Station Noord"));
    assert_eq!(snapshot.line_number.as_deref(), Some("45"));
    assert_eq!(snapshot.duration_minutes, Some(10));
}

#[tokio::test]
async fn test_non_ok_api_status_surfaces_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "routes": []}"#,
        ))
        .mount(&server)
        .await;

    let config = DirectionsConfig::for_testing(server.uri());
    let client = GoogleDirectionsClient::new(config).unwrap();

    let err = client
        .fetch_directions(&origin(), &destination(), "45")
        .await
        .unwrap_err();

    match err {
        DirectionsError::ApiStatus { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
        }
        other => panic!("expected ApiStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = DirectionsConfig::for_testing(server.uri());
    let client = GoogleDirectionsClient::new(config).unwrap();

    let err = client
        .fetch_directions(&origin(), &destination(), "45")
        .await
        .unwrap_err();

    assert!(matches!(err, DirectionsError::RequestFailed(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let config = DirectionsConfig::for_testing(server.uri());
    let client = GoogleDirectionsClient::new(config).unwrap();

    let err = client
        .fetch_directions(&origin(), &destination(), "45")
        .await
        .unwrap_err();

    assert!(matches!(err, DirectionsError::ParseError(_)));
}

#[tokio::test]
async fn test_session_recreated_after_shutdown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_directions_json()))
        .expect(2)
        .mount(&server)
        .await;

    let config = DirectionsConfig::for_testing(server.uri());
    let client = GoogleDirectionsClient::new(config).unwrap();

    client
        .fetch_directions(&origin(), &destination(), "45")
        .await
        .unwrap();

    client.shutdown();

    // The session is rebuilt lazily; the fetch still succeeds.
    client
        .fetch_directions(&origin(), &destination(), "45")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_zero_results_is_api_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"status": "ZERO_RESULTS", "routes": []}"#),
        )
        .mount(&server)
        .await;

    let config = DirectionsConfig::for_testing(server.uri());
    let client = GoogleDirectionsClient::new(config).unwrap();

    let err = client
        .fetch_directions(&origin(), &destination(), "45")
        .await
        .unwrap_err();

    assert!(matches!(err, DirectionsError::ApiStatus { .. }));
    assert!(!err.is_retryable());
}
