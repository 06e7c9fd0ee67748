//! Geographic location value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a location from the `"latitude,longitude"` form used by
    /// host commands and configuration files
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if the string is not two comma-separated
    /// numbers or the values are out of range
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinates> {
        let (lat, lon) = s.split_once(',').ok_or(InvalidCoordinates)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| InvalidCoordinates)?;
        let longitude: f64 = lon.trim().parse().map_err(|_| InvalidCoordinates)?;
        Self::new(latitude, longitude)
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Render as the compact `lat,lon` pair the Directions API expects
    #[must_use]
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoLocation {
    type Err = InvalidCoordinates;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates_accepted() {
        let loc = GeoLocation::new(52.1, 4.1).unwrap();
        assert!((loc.latitude() - 52.1).abs() < f64::EPSILON);
        assert!((loc.longitude() - 4.1).abs() < f64::EPSILON);
    }

    #[test]
    fn latitude_out_of_range_rejected() {
        assert!(GeoLocation::new(95.0, 0.0).is_err());
        assert!(GeoLocation::new(-90.5, 0.0).is_err());
    }

    #[test]
    fn longitude_out_of_range_rejected() {
        assert!(GeoLocation::new(0.0, 180.5).is_err());
        assert!(GeoLocation::new(0.0, -200.0).is_err());
    }

    #[test]
    fn boundary_values_accepted() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn parses_comma_separated_pair() {
        let loc = GeoLocation::parse("52.1,4.1").unwrap();
        assert!((loc.latitude() - 52.1).abs() < f64::EPSILON);

        let loc = GeoLocation::parse(" 52.1 , 4.1 ").unwrap();
        assert!((loc.longitude() - 4.1).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_rejects_out_of_range_latitude() {
        assert!(GeoLocation::parse("95,0").is_err());
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(GeoLocation::parse("").is_err());
        assert!(GeoLocation::parse("52.1").is_err());
        assert!(GeoLocation::parse("52.1;4.1").is_err());
        assert!(GeoLocation::parse("north,south").is_err());
    }

    #[test]
    fn query_form_round_trips() {
        let loc = GeoLocation::new(52.1234567, 4.1234567).unwrap();
        let parsed = GeoLocation::parse(&loc.as_query()).unwrap();
        assert_eq!(loc, parsed);
    }
}
