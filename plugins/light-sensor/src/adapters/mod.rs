//! Adapters that bridge Tauri and the OS to the sensor crate's traits.

mod event_bus;
#[cfg(target_os = "android")]
mod android;

pub use event_bus::TauriEventBus;
#[cfg(target_os = "android")]
pub use android::AndroidSensorManager;
