//! Backend for platforms with a real light sensor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lumen_events::{event_names, EventBusRef};

use crate::backend::{Platform, SensorBackend};
use crate::error::{Result, SensorError};
use crate::manager::{new_callback, RawSensorEvent, SensorHandle, SensorManager};
use crate::model::LightMeasurement;
use crate::session::{millis_to_micros, SensorSession};

/// Translates raw OS events into measurements and publishes them.
///
/// Clones share the listening flag, so the copy captured by an OS callback
/// goes quiet as soon as the backend stops, even if the OS still delivers
/// an event that was already in flight.
#[derive(Clone)]
pub struct MeasurementSink {
    bus: EventBusRef,
    listening: Arc<AtomicBool>,
}

impl MeasurementSink {
    pub fn new(bus: EventBusRef) -> Self {
        Self {
            bus,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    fn set_listening(&self, listening: bool) {
        self.listening.store(listening, Ordering::Release);
    }

    /// Publish `event` as a `lightSensorChange` if it is a light reading
    /// and the sink is listening.
    pub fn on_sensor_event(&self, event: RawSensorEvent) {
        if !self.is_listening() {
            tracing::trace!(sensor_type = event.sensor_type, "sensor_event_after_stop");
            return;
        }

        let Some(measurement) = to_measurement(&event) else {
            tracing::trace!(sensor_type = event.sensor_type, "sensor_event_ignored");
            return;
        };

        match serde_json::to_value(measurement) {
            Ok(payload) => self.bus.emit(event_names::LIGHT_SENSOR_CHANGE, payload),
            Err(e) => tracing::error!("failed to serialize light measurement: {}", e),
        }
    }
}

/// Convert a raw event into a measurement.
///
/// Returns `None` for non-light sensors and for events without values.
pub fn to_measurement(event: &RawSensorEvent) -> Option<LightMeasurement> {
    if !event.is_light() {
        return None;
    }
    let illuminance = *event.values.first()?;
    let timestamp = match event.timestamp_nanos {
        Some(nanos) => nanos as f64 / 1_000_000_000.0,
        None => wall_clock_seconds(),
    };
    Some(LightMeasurement {
        illuminance: f64::from(illuminance),
        timestamp,
    })
}

fn wall_clock_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Sensor backend over an OS [`SensorManager`].
///
/// Holds at most one registration. Dropping the backend unregisters it.
pub struct NativeBackend<M: SensorManager> {
    manager: M,
    sensor: Option<SensorHandle>,
    session: SensorSession,
    sink: MeasurementSink,
}

impl<M: SensorManager> NativeBackend<M> {
    /// Look up the default light sensor and prepare an inactive session.
    pub fn new(manager: M, bus: EventBusRef) -> Self {
        let sensor = manager.default_light_sensor();
        match &sensor {
            Some(handle) => tracing::info!(sensor = %handle.name, "light_sensor_found"),
            None => tracing::info!("light_sensor_missing"),
        }
        Self {
            manager,
            sensor,
            session: SensorSession::default(),
            sink: MeasurementSink::new(bus),
        }
    }

    pub fn session(&self) -> &SensorSession {
        &self.session
    }

    pub fn sensor(&self) -> Option<&SensorHandle> {
        self.sensor.as_ref()
    }

    /// Handle an event from the OS. Registered listeners call this path.
    pub fn on_sensor_event(&self, event: RawSensorEvent) {
        self.sink.on_sensor_event(event);
    }

    fn unregister(&mut self) {
        if self.session.deactivate() {
            self.sink.set_listening(false);
            self.manager.unregister_listener();
            tracing::info!("light_sensor_stopped");
        }
    }
}

impl<M: SensorManager> SensorBackend for NativeBackend<M> {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn is_available(&self) -> bool {
        self.sensor.is_some()
    }

    fn start(&mut self, update_interval_ms: u32) -> Result<()> {
        let Some(sensor) = &self.sensor else {
            return Err(SensorError::SensorUnavailable(
                "Light sensor is not available on this device".to_string(),
            ));
        };

        if self.session.is_listening() {
            tracing::debug!(
                interval_us = self.session.update_interval_micros(),
                "light_sensor_already_started"
            );
            return Ok(());
        }

        let interval_us = millis_to_micros(update_interval_ms);
        let sink = self.sink.clone();
        let callback = new_callback(move |event| sink.on_sensor_event(event));

        // Set before registering: the OS may deliver the first event from
        // inside `register_listener`.
        self.sink.set_listening(true);
        if !self.manager.register_listener(sensor, interval_us, callback) {
            self.sink.set_listening(false);
            tracing::warn!(interval_us, "light_sensor_registration_failed");
            return Err(SensorError::RegistrationFailed);
        }

        self.session.activate(interval_us);
        tracing::info!(interval_us, "light_sensor_started");
        Ok(())
    }

    fn stop(&mut self) {
        self.unregister();
    }

    fn is_listening(&self) -> bool {
        self.session.is_listening()
    }
}

impl<M: SensorManager> Drop for NativeBackend<M> {
    fn drop(&mut self) {
        self.unregister();
    }
}
