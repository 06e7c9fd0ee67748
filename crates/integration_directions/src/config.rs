//! Directions service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Google Maps Directions service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsConfig {
    /// Base URL for the Maps API (override for tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static API credential, required and non-empty
    pub api_key: String,

    /// Network timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl DirectionsConfig {
    /// Create a configuration with the given API key and defaults elsewhere
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Create a configuration pointed at a mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.api_key.trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DirectionsConfig::new("secret");
        assert_eq!(config.base_url, "https://maps.googleapis.com/maps/api");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn test_validation_success() {
        assert!(DirectionsConfig::new("secret").validate().is_ok());
    }

    #[test]
    fn test_validation_empty_api_key() {
        assert!(DirectionsConfig::new("").validate().is_err());
        assert!(DirectionsConfig::new("   ").validate().is_err());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = DirectionsConfig {
            base_url: String::new(),
            ..DirectionsConfig::new("secret")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = DirectionsConfig {
            timeout_secs: 0,
            ..DirectionsConfig::new("secret")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_applies_defaults() {
        let config: DirectionsConfig = serde_json::from_str(r#"{"api_key":"secret"}"#).unwrap();
        assert_eq!(config.base_url, "https://maps.googleapis.com/maps/api");
        assert_eq!(config.timeout_secs, 10);
    }
}
