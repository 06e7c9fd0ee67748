//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{GeoLocation, RouteId, TrackingRequest};
use proptest::prelude::*;

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn query_form_parses_back(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon).unwrap();
            let parsed = GeoLocation::parse(&loc.as_query());
            prop_assert_eq!(Ok(loc), parsed);
        }
    }
}

mod route_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn non_blank_identifiers_accepted(id in "[a-zA-Z0-9_-]{1,32}") {
            let route_id = RouteId::new(id.clone());
            prop_assert!(route_id.is_ok());
            let route_id = route_id.unwrap();
            prop_assert_eq!(route_id.as_str(), id.as_str());
        }

        #[test]
        fn surrounding_whitespace_never_distinguishes_ids(
            id in "[a-zA-Z0-9_-]{1,32}",
            pad in " {0,4}"
        ) {
            let bare = RouteId::new(id.clone()).unwrap();
            let padded = RouteId::new(format!("{pad}{id}{pad}")).unwrap();
            prop_assert_eq!(bare, padded);
        }
    }
}

mod tracking_request_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_raw_parts_parse(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let request = TrackingRequest::parse(
                "45",
                &format!("{lat1},{lon1}"),
                &format!("{lat2},{lon2}"),
            );
            prop_assert!(request.is_ok());
        }

        #[test]
        fn out_of_range_origin_always_rejected(
            lat in 90.1f64..1000.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let request = TrackingRequest::parse("45", &format!("{lat},{lon}"), "52.2,4.3");
            prop_assert!(request.is_err());
        }
    }
}
