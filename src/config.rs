//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

/// Settings shared by discovery and the bridges it yields.
///
/// Serializable so it can be embedded in an application's own config file.
/// Missing fields fall back to their defaults.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use hue_bridge_rs::Config;
///
/// let config = Config::default()
///     .with_device_type("living-room#kiosk")
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.discovery_url, Config::DISCOVERY_URL);
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cloud endpoint listing the bridges on the caller's network.
    pub discovery_url: String,
    /// Application identifier sent when pairing (`app_name#instance_name`).
    pub device_type: String,
    /// Per-request timeout of the default HTTP transport.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            discovery_url: Self::DISCOVERY_URL.to_string(),
            device_type: Self::DEVICE_TYPE.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    pub const DISCOVERY_URL: &'static str = "https://discovery.meethue.com";
    pub const DEVICE_TYPE: &'static str = "hue-bridge-rs#default";

    pub fn with_discovery_url(mut self, url: &str) -> Self {
        self.discovery_url = url.to_string();
        self
    }

    pub fn with_device_type(mut self, device_type: &str) -> Self {
        self.device_type = device_type.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.discovery_url, "https://discovery.meethue.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_deserialize() {
        let config: Config =
            serde_json::from_str(r#"{"discovery_url":"http://127.0.0.1:8080","timeout":2}"#)
                .unwrap();
        assert_eq!(config.discovery_url, "http://127.0.0.1:8080");
        assert_eq!(config.device_type, Config::DEVICE_TYPE);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_serialize_timeout_as_seconds() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(value["timeout"], 5);
    }
}
