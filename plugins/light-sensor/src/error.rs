use serde::{Serialize, Serializer};

use lumen_sensor::SensorError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Sensor task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[cfg(target_os = "android")]
    #[error(transparent)]
    PluginInvoke(#[from] tauri::plugin::mobile::PluginInvokeError),
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
