use serde::{Deserialize, Serialize};

/// Version reported by `get_plugin_version` on every backend.
pub const PLUGIN_VERSION: &str = "0.0.1";

/// Update interval used when the caller does not pass one.
pub const DEFAULT_UPDATE_INTERVAL_MS: u32 = 200;

/// A single ambient light reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightMeasurement {
    /// Ambient light level in lux.
    pub illuminance: f64,
    /// Seconds since the epoch.
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionState {
    Prompt,
    PromptWithRationale,
    Granted,
    Denied,
}

/// Result of a permission check or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionStatus {
    /// High sampling rate sensor permission. Install-time on Android, so
    /// never negotiated at runtime.
    pub high_sampling_rate: PermissionState,
}

impl PermissionStatus {
    pub const fn granted() -> Self {
        Self {
            high_sampling_rate: PermissionState::Granted,
        }
    }
}

/// Options for `start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOptions {
    /// Desired interval between updates in milliseconds.
    #[serde(default)]
    pub update_interval: Option<u32>,
}

impl StartOptions {
    pub fn with_interval(ms: u32) -> Self {
        Self {
            update_interval: Some(ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResult {
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_permission_status_wire_format() {
        let value = serde_json::to_value(PermissionStatus::granted()).unwrap();
        assert_eq!(value, json!({"highSamplingRate": "granted"}));

        let state: PermissionState = serde_json::from_str(r#""prompt-with-rationale""#).unwrap();
        assert_eq!(state, PermissionState::PromptWithRationale);
    }

    #[test]
    fn test_start_options_deserialize() {
        let opts: StartOptions = serde_json::from_str(r#"{"updateInterval": 500}"#).unwrap();
        assert_eq!(opts.update_interval, Some(500));

        let empty: StartOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, StartOptions::default());
    }

    #[test]
    fn test_negative_interval_rejected() {
        let result = serde_json::from_str::<StartOptions>(r#"{"updateInterval": -5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_measurement_wire_format() {
        let m = LightMeasurement {
            illuminance: 120.5,
            timestamp: 1.0,
        };
        assert_eq!(
            serde_json::to_value(m).unwrap(),
            json!({"illuminance": 120.5, "timestamp": 1.0})
        );
    }
}
