use serde::Deserialize;

use lumen_sensor::DEFAULT_UPDATE_INTERVAL_MS;

/// `plugins.lumen-light-sensor` in `tauri.conf.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Interval in milliseconds used when `start` is called without one.
    #[serde(default)]
    pub default_update_interval: Option<u32>,
}

impl Config {
    pub fn update_interval_ms(&self) -> u32 {
        match self.default_update_interval {
            Some(0) => {
                tracing::warn!("ignoring zero defaultUpdateInterval");
                DEFAULT_UPDATE_INTERVAL_MS
            }
            Some(ms) => ms,
            None => DEFAULT_UPDATE_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_200ms() {
        assert_eq!(Config::default().update_interval_ms(), 200);

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.update_interval_ms(), 200);
    }

    #[test]
    fn test_configured_interval() {
        let config: Config = serde_json::from_str(r#"{"defaultUpdateInterval": 750}"#).unwrap();
        assert_eq!(config.update_interval_ms(), 750);
    }

    #[test]
    fn test_zero_interval_falls_back() {
        let config: Config = serde_json::from_str(r#"{"defaultUpdateInterval": 0}"#).unwrap();
        assert_eq!(config.update_interval_ms(), 200);
    }
}
