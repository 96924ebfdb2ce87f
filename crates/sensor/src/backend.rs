//! Platform backends behind a single capability trait.

use serde::Serialize;

use crate::error::{Result, SensorError};
use crate::model::PermissionStatus;

/// Runtime the plugin was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    /// Any host without a native sensor bridge (desktop webviews, browsers).
    Web,
}

impl Platform {
    pub fn current() -> Self {
        #[cfg(target_os = "android")]
        {
            Platform::Android
        }
        #[cfg(target_os = "ios")]
        {
            Platform::Ios
        }
        #[cfg(not(any(target_os = "android", target_os = "ios")))]
        {
            Platform::Web
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
            Platform::Web => "web",
        }
    }
}

/// Operations every platform backend supports.
pub trait SensorBackend: Send {
    fn platform(&self) -> Platform;

    /// Whether a light sensor was found at initialization.
    fn is_available(&self) -> bool;

    /// Begin delivering measurements every `update_interval_ms`.
    ///
    /// Succeeds without side effects when already listening.
    fn start(&mut self, update_interval_ms: u32) -> Result<()>;

    /// Stop delivering measurements. Never fails.
    fn stop(&mut self);

    fn is_listening(&self) -> bool;

    /// Whether measurement listeners may be attached on this backend.
    fn accepts_listeners(&self) -> Result<()> {
        Ok(())
    }

    fn check_permissions(&self) -> PermissionStatus {
        PermissionStatus::granted()
    }

    fn request_permissions(&mut self) -> PermissionStatus {
        PermissionStatus::granted()
    }
}

/// Backend for platforms with no accessible light sensor.
#[derive(Debug, Clone, Copy)]
pub struct UnavailableBackend {
    platform: Platform,
}

impl UnavailableBackend {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    fn unavailable(&self) -> SensorError {
        let message = match self.platform {
            Platform::Web => "Light sensor is not available on web.".to_string(),
            other => format!("Light sensor is not available on {}", other.display_name()),
        };
        SensorError::SensorUnavailable(message)
    }
}

impl SensorBackend for UnavailableBackend {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _update_interval_ms: u32) -> Result<()> {
        Err(self.unavailable())
    }

    fn stop(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }

    /// iOS accepts listeners that never fire; the web rejects them.
    fn accepts_listeners(&self) -> Result<()> {
        match self.platform {
            Platform::Web => Err(self.unavailable()),
            _ => Ok(()),
        }
    }
}
