//! Seam to the operating system's sensor subsystem.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Android `Sensor.TYPE_LIGHT`.
pub const SENSOR_TYPE_LIGHT: i32 = 5;

/// Opaque reference to a physical sensor, obtained once at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorHandle {
    pub name: String,
    #[serde(default)]
    pub vendor: Option<String>,
    /// Maximum range in lux.
    #[serde(default)]
    pub max_range: Option<f32>,
}

/// An event as delivered by the OS, before translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSensorEvent {
    pub sensor_type: i32,
    pub values: Vec<f32>,
    /// Hardware timestamp in nanoseconds, when the platform provides one.
    #[serde(default)]
    pub timestamp_nanos: Option<i64>,
}

impl RawSensorEvent {
    pub fn light(illuminance: f32, timestamp_nanos: i64) -> Self {
        Self {
            sensor_type: SENSOR_TYPE_LIGHT,
            values: vec![illuminance],
            timestamp_nanos: Some(timestamp_nanos),
        }
    }

    pub fn is_light(&self) -> bool {
        self.sensor_type == SENSOR_TYPE_LIGHT
    }
}

pub type RawEventCallback = Arc<dyn Fn(RawSensorEvent) + Send + Sync + 'static>;

pub fn new_callback<F>(f: F) -> RawEventCallback
where
    F: Fn(RawSensorEvent) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The OS sensor registration API.
///
/// Implementations deliver raw events to the registered callback on their
/// own schedule and thread, until [`unregister_listener`](Self::unregister_listener).
pub trait SensorManager: Send + Sync {
    /// Look up the default light sensor. `None` when the device has none.
    fn default_light_sensor(&self) -> Option<SensorHandle>;

    /// Register for events at the given sampling period. Returns false when
    /// the OS rejects the registration.
    fn register_listener(
        &self,
        sensor: &SensorHandle,
        sampling_period_us: u32,
        callback: RawEventCallback,
    ) -> bool;

    fn unregister_listener(&self);
}
