use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    /// No light sensor on this device or platform.
    #[error("{0}")]
    SensorUnavailable(String),

    /// The OS refused the listener registration.
    #[error("Failed to register light sensor listener")]
    RegistrationFailed,
}

impl Serialize for SensorError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SensorError>;
