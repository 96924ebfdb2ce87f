use lumen_events::event_names;
use lumen_sensor::{
    AvailabilityResult, LightMeasurement, PermissionStatus, StartOptions, VersionResult,
};
use tauri::{command, ipc::Channel, State};

use crate::{Error, LightSensorState, Result};

#[command]
pub async fn is_available(state: State<'_, LightSensorState>) -> Result<AvailabilityResult> {
    Ok(state.sensor.is_available())
}

// `start` and `stop` may call into the native shim and wait for its reply
// while holding the backend lock, so they run on the blocking pool.

#[command]
pub async fn start(
    state: State<'_, LightSensorState>,
    options: Option<StartOptions>,
) -> Result<()> {
    let sensor = state.shared_sensor();
    let options = options.unwrap_or_default();
    tokio::task::spawn_blocking(move || sensor.start(options)).await??;
    Ok(())
}

#[command]
pub async fn stop(state: State<'_, LightSensorState>) -> Result<()> {
    let sensor = state.shared_sensor();
    tokio::task::spawn_blocking(move || sensor.stop()).await?;
    Ok(())
}

#[command]
pub async fn check_permissions(state: State<'_, LightSensorState>) -> Result<PermissionStatus> {
    Ok(state.sensor.check_permissions())
}

#[command]
pub async fn request_permissions(state: State<'_, LightSensorState>) -> Result<PermissionStatus> {
    Ok(state.sensor.request_permissions())
}

#[command]
pub async fn get_plugin_version(state: State<'_, LightSensorState>) -> Result<VersionResult> {
    Ok(state.sensor.plugin_version())
}

/// Subscribe a webview channel to `event`. Returns the listener id.
#[command]
pub async fn add_listener(
    state: State<'_, LightSensorState>,
    event: String,
    on_event: Channel<LightMeasurement>,
) -> Result<String> {
    if !event_names::is_known(&event) {
        return Err(Error::UnknownEvent(event));
    }

    let handle = state.sensor.add_listener(move |measurement| {
        if let Err(e) = on_event.send(measurement) {
            tracing::warn!("failed to deliver light measurement to channel: {:?}", e);
        }
    })?;
    Ok(state.track(handle).await)
}

#[command]
pub async fn remove_listener(state: State<'_, LightSensorState>, id: String) -> Result<bool> {
    Ok(state.untrack(&id).await)
}

#[command]
pub async fn remove_all_listeners(state: State<'_, LightSensorState>) -> Result<()> {
    state.clear().await;
    Ok(())
}
