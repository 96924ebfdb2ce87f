//! Event plumbing for the lumen light sensor bridge.
//!
//! Backends publish JSON payloads through the [`EventBus`] trait; the
//! [`ListenerRegistry`] fans them out to in-process subscribers and the
//! Tauri plugin forwards them to the webview.

mod bus;
mod listeners;

pub use bus::{CompositeEventBus, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus};
pub use listeners::{ListenerCallback, ListenerHandle, ListenerId, ListenerRegistry};

/// Event names as constants to prevent typos.
pub mod event_names {
    /// A new ambient light measurement is available.
    pub const LIGHT_SENSOR_CHANGE: &str = "lightSensorChange";

    /// Every event name a client may subscribe to.
    pub const ALL: &[&str] = &[LIGHT_SENSOR_CHANGE];

    pub fn is_known(name: &str) -> bool {
        ALL.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::event_names;

    #[test]
    fn test_known_event_names() {
        assert!(event_names::is_known("lightSensorChange"));
        assert!(!event_names::is_known("lightsensorchange"));
        assert!(!event_names::is_known(""));
    }
}
