//! `SensorManager` over the Kotlin shim in `android/`.
//!
//! The shim owns the Android `SensorManager` and `SensorEventListener`;
//! raw events come back over a Tauri channel.

use lumen_sensor::{RawEventCallback, RawSensorEvent, SensorHandle, SensorManager};
use serde::{Deserialize, Serialize};
use tauri::{
    ipc::Channel,
    plugin::{PluginApi, PluginHandle},
    Runtime,
};

const PLUGIN_IDENTIFIER: &str = "app.lumen.lightsensor";
const PLUGIN_CLASS: &str = "SensorBridgePlugin";

#[derive(Deserialize)]
struct DefaultSensorResponse {
    sensor: Option<SensorHandle>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterArgs {
    sampling_period_us: u32,
    channel: Channel<serde_json::Value>,
}

#[derive(Deserialize)]
struct RegisterResponse {
    registered: bool,
}

pub struct AndroidSensorManager<R: Runtime> {
    handle: PluginHandle<R>,
}

impl<R: Runtime> AndroidSensorManager<R> {
    pub fn register<C: serde::de::DeserializeOwned>(
        api: &PluginApi<R, C>,
    ) -> crate::Result<Self> {
        let handle = api.register_android_plugin(PLUGIN_IDENTIFIER, PLUGIN_CLASS)?;
        Ok(Self { handle })
    }
}

impl<R: Runtime> SensorManager for AndroidSensorManager<R> {
    fn default_light_sensor(&self) -> Option<SensorHandle> {
        match self
            .handle
            .run_mobile_plugin::<DefaultSensorResponse>("getDefaultLightSensor", ())
        {
            Ok(response) => response.sensor,
            Err(e) => {
                tracing::error!("failed to query default light sensor: {}", e);
                None
            }
        }
    }

    fn register_listener(
        &self,
        _sensor: &SensorHandle,
        sampling_period_us: u32,
        callback: RawEventCallback,
    ) -> bool {
        let channel = Channel::<serde_json::Value>::new(move |body| {
            match body.deserialize::<RawSensorEvent>() {
                Ok(event) => callback(event),
                Err(e) => tracing::warn!("malformed sensor event from shim: {}", e),
            }
            Ok(())
        });

        let args = RegisterArgs {
            sampling_period_us,
            channel,
        };
        match self
            .handle
            .run_mobile_plugin::<RegisterResponse>("registerListener", args)
        {
            Ok(response) => response.registered,
            Err(e) => {
                tracing::error!("registerListener failed: {}", e);
                false
            }
        }
    }

    fn unregister_listener(&self) {
        if let Err(e) = self
            .handle
            .run_mobile_plugin::<serde_json::Value>("unregisterListener", ())
        {
            tracing::error!("unregisterListener failed: {}", e);
        }
    }
}
