//! Client-facing light sensor API.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lumen_events::{event_names, ListenerHandle, ListenerRegistry};

use crate::backend::{Platform, SensorBackend, UnavailableBackend};
use crate::error::Result;
use crate::model::{
    AvailabilityResult, LightMeasurement, PermissionStatus, StartOptions, VersionResult,
    DEFAULT_UPDATE_INTERVAL_MS, PLUGIN_VERSION,
};

/// The light sensor as application code sees it, whatever backend is active.
pub struct LightSensor {
    backend: Mutex<Box<dyn SensorBackend>>,
    listeners: ListenerRegistry,
    default_update_interval_ms: u32,
}

impl LightSensor {
    /// Wrap `backend`. Measurements it publishes should reach `listeners`.
    pub fn new(backend: Box<dyn SensorBackend>, listeners: ListenerRegistry) -> Self {
        tracing::debug!(platform = ?backend.platform(), "light_sensor_backend_selected");
        Self {
            backend: Mutex::new(backend),
            listeners,
            default_update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
        }
    }

    /// Sensor for a platform without light sensor access.
    pub fn unavailable(platform: Platform) -> Self {
        Self::new(
            Box::new(UnavailableBackend::new(platform)),
            ListenerRegistry::new(),
        )
    }

    /// Interval used by `start` when the options leave it out.
    pub fn with_default_update_interval(mut self, ms: u32) -> Self {
        self.default_update_interval_ms = ms;
        self
    }

    fn backend(&self) -> MutexGuard<'_, Box<dyn SensorBackend>> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn platform(&self) -> Platform {
        self.backend().platform()
    }

    pub fn is_available(&self) -> AvailabilityResult {
        AvailabilityResult {
            available: self.backend().is_available(),
        }
    }

    pub fn start(&self, options: StartOptions) -> Result<()> {
        let interval = options
            .update_interval
            .unwrap_or(self.default_update_interval_ms);
        self.backend().start(interval)
    }

    pub fn stop(&self) {
        self.backend().stop();
    }

    pub fn is_listening(&self) -> bool {
        self.backend().is_listening()
    }

    pub fn check_permissions(&self) -> PermissionStatus {
        self.backend().check_permissions()
    }

    pub fn request_permissions(&self) -> PermissionStatus {
        self.backend().request_permissions()
    }

    pub fn plugin_version(&self) -> VersionResult {
        VersionResult {
            version: PLUGIN_VERSION.to_string(),
        }
    }

    /// Call `callback` for each `lightSensorChange` measurement.
    ///
    /// Fails with [`SensorError::SensorUnavailable`](crate::SensorError) on
    /// backends that do not accept listeners.
    pub fn add_listener<F>(&self, callback: F) -> Result<ListenerHandle>
    where
        F: Fn(LightMeasurement) + Send + Sync + 'static,
    {
        self.backend().accepts_listeners()?;
        Ok(self
            .listeners
            .add(event_names::LIGHT_SENSOR_CHANGE, move |payload| {
                match serde_json::from_value::<LightMeasurement>(payload.clone()) {
                    Ok(measurement) => callback(measurement),
                    Err(e) => tracing::warn!("dropping malformed light measurement: {}", e),
                }
            }))
    }

    pub fn remove_all_listeners(&self) {
        self.listeners.remove_all();
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Release the OS registration. Called when the host tears the plugin down.
    pub fn shutdown(&self) {
        let mut backend = self.backend();
        if backend.is_listening() {
            tracing::info!("light_sensor_shutdown_while_listening");
            backend.stop();
        }
    }
}
