//! Ambient light sensor plugin.
//!
//! Registers the commands in [`commands`] and emits every measurement as a
//! global `lightSensorChange` event. Rust code reaches the same sensor
//! through [`LightSensorExt`]:
//!
//! ```ignore
//! use tauri_plugin_lumen_light_sensor::LightSensorExt;
//!
//! let handle = app.light_sensor().add_listener(|m| {
//!     tracing::info!(lux = m.illuminance, "ambient_light");
//! })?;
//! app.light_sensor().start(Default::default())?;
//! ```

use std::sync::Arc;

use lumen_events::{CompositeEventBus, EventBusRef, ListenerRegistry};
use lumen_sensor::{LightSensor, SensorBackend};
use tauri::{
    plugin::{Builder, PluginApi, TauriPlugin},
    AppHandle, Manager, Runtime,
};

mod adapters;
mod commands;
mod config;
mod error;
mod state;

pub use adapters::TauriEventBus;
pub use config::Config;
pub use error::{Error, Result};
pub use lumen_sensor::{
    AvailabilityResult, LightMeasurement, PermissionState, PermissionStatus, Platform,
    StartOptions, VersionResult,
};
pub use state::LightSensorState;

const PLUGIN_NAME: &str = "lumen-light-sensor";

/// Access to the light sensor from anything that can reach managed state.
pub trait LightSensorExt<R: Runtime> {
    fn light_sensor(&self) -> &LightSensor;
}

impl<R: Runtime, T: Manager<R>> LightSensorExt<R> for T {
    fn light_sensor(&self) -> &LightSensor {
        self.state::<LightSensorState>().inner().sensor()
    }
}

pub fn init<R: Runtime>() -> TauriPlugin<R, Option<Config>> {
    Builder::<R, Option<Config>>::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::is_available,
            commands::start,
            commands::stop,
            commands::check_permissions,
            commands::request_permissions,
            commands::get_plugin_version,
            commands::add_listener,
            commands::remove_listener,
            commands::remove_all_listeners,
        ])
        .setup(|app, api| {
            let interval_ms = api
                .config()
                .as_ref()
                .map(Config::update_interval_ms)
                .unwrap_or(lumen_sensor::DEFAULT_UPDATE_INTERVAL_MS);

            let listeners = ListenerRegistry::new();
            let bus: EventBusRef = Arc::new(
                CompositeEventBus::new()
                    .with(Arc::new(listeners.clone()))
                    .with(Arc::new(TauriEventBus::new(app.clone()))),
            );

            let backend = create_backend(app, &api, bus)?;
            let sensor =
                LightSensor::new(backend, listeners).with_default_update_interval(interval_ms);
            tracing::info!(
                platform = ?sensor.platform(),
                available = sensor.is_available().available,
                default_interval_ms = interval_ms,
                "light_sensor_plugin_ready"
            );

            app.manage(LightSensorState::new(sensor));
            Ok(())
        })
        .on_drop(|app| {
            if let Some(state) = app.try_state::<LightSensorState>() {
                state.sensor().shutdown();
            }
        })
        .build()
}

#[cfg(target_os = "android")]
fn create_backend<R: Runtime>(
    _app: &AppHandle<R>,
    api: &PluginApi<R, Option<Config>>,
    bus: EventBusRef,
) -> Result<Box<dyn SensorBackend>> {
    let manager = adapters::AndroidSensorManager::register(api)?;
    Ok(Box::new(lumen_sensor::NativeBackend::new(manager, bus)))
}

#[cfg(not(target_os = "android"))]
fn create_backend<R: Runtime>(
    _app: &AppHandle<R>,
    _api: &PluginApi<R, Option<Config>>,
    _bus: EventBusRef,
) -> Result<Box<dyn SensorBackend>> {
    Ok(Box::new(lumen_sensor::UnavailableBackend::new(
        Platform::current(),
    )))
}
