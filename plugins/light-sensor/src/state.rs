//! Plugin state management.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_events::ListenerHandle;
use lumen_sensor::LightSensor;
use tokio::sync::Mutex;

/// Managed state: the sensor facade plus the listeners the webview added
/// through channels, keyed by the id returned to it.
pub struct LightSensorState {
    pub(crate) sensor: Arc<LightSensor>,
    pub(crate) channel_listeners: Mutex<HashMap<String, ListenerHandle>>,
}

impl LightSensorState {
    pub fn new(sensor: LightSensor) -> Self {
        Self {
            sensor: Arc::new(sensor),
            channel_listeners: Mutex::new(HashMap::new()),
        }
    }

    pub fn sensor(&self) -> &LightSensor {
        &self.sensor
    }

    /// Owned reference for work moved off the async runtime.
    pub(crate) fn shared_sensor(&self) -> Arc<LightSensor> {
        Arc::clone(&self.sensor)
    }

    pub(crate) async fn track(&self, handle: ListenerHandle) -> String {
        let id = handle.id().to_string();
        self.channel_listeners.lock().await.insert(id.clone(), handle);
        id
    }

    pub(crate) async fn untrack(&self, id: &str) -> bool {
        match self.channel_listeners.lock().await.remove(id) {
            Some(handle) => handle.remove(),
            None => false,
        }
    }

    pub(crate) async fn clear(&self) {
        self.channel_listeners.lock().await.clear();
        self.sensor.remove_all_listeners();
    }
}
