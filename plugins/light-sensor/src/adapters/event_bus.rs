//! Tauri event bus adapter.

use lumen_events::EventBus;
use tauri::{AppHandle, Emitter, Runtime};

/// Forwards bus events to the webview as global Tauri events.
pub struct TauriEventBus<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriEventBus<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> EventBus for TauriEventBus<R> {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        if let Err(e) = self.app.emit(topic, payload) {
            tracing::error!(topic, "failed to emit event: {:?}", e);
        }
    }
}
