//! Ambient light sensor sessions.
//!
//! A [`LightSensor`] delegates to one [`SensorBackend`] picked at startup:
//! [`NativeBackend`] drives a real sensor through the OS [`SensorManager`],
//! [`UnavailableBackend`] answers for platforms without one. Measurements
//! are published as `lightSensorChange` events on a
//! [`lumen_events::EventBus`].
//!
//! # Example
//!
//! ```ignore
//! use lumen_events::ListenerRegistry;
//! use lumen_sensor::{LightSensor, NativeBackend, StartOptions};
//!
//! let listeners = ListenerRegistry::new();
//! let backend = NativeBackend::new(os_manager, std::sync::Arc::new(listeners.clone()));
//! let sensor = LightSensor::new(Box::new(backend), listeners);
//!
//! sensor.add_listener(|m| println!("{} lx", m.illuminance))?;
//! sensor.start(StartOptions::with_interval(500))?;
//! ```

mod backend;
mod error;
mod manager;
mod model;
mod native;
mod sensor;
mod session;
pub mod testing;

pub use backend::{Platform, SensorBackend, UnavailableBackend};
pub use error::{Result, SensorError};
pub use manager::{
    new_callback, RawEventCallback, RawSensorEvent, SensorHandle, SensorManager,
    SENSOR_TYPE_LIGHT,
};
pub use model::*;
pub use native::{to_measurement, MeasurementSink, NativeBackend};
pub use sensor::LightSensor;
pub use session::{millis_to_micros, SensorSession, MAX_SAMPLING_PERIOD_US};
