//! Event bus abstraction for decoupled event emission.
//!
//! Sensor backends publish through this trait so they can run and be tested
//! without Tauri. The plugin plugs in a Tauri-backed bus at registration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Trait for publishing events to whoever is subscribed.
pub trait EventBus: Send + Sync {
    /// Emit an event with a JSON payload.
    ///
    /// # Arguments
    /// * `topic` - Event name (e.g., "lightSensorChange")
    /// * `payload` - JSON payload to emit
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Type alias for shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

/// Forwards every event to each of its inner buses, in order.
#[derive(Default, Clone)]
pub struct CompositeEventBus {
    buses: Vec<EventBusRef>,
}

impl CompositeEventBus {
    /// Create a composite bus with no inner buses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bus to the end of the forwarding list.
    pub fn with(mut self, bus: EventBusRef) -> Self {
        self.buses.push(bus);
        self
    }

    /// Get the number of inner buses.
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    /// Check if there are no inner buses.
    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }
}

impl EventBus for CompositeEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        // The last bus takes ownership of the payload, the rest get clones.
        let Some((last, rest)) = self.buses.split_last() else {
            return;
        };
        for bus in rest {
            bus.emit(topic, payload.clone());
        }
        last.emit(topic, payload);
    }
}

/// In-memory event bus for testing.
///
/// Captures all emitted events for later inspection.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

/// A captured event from InMemoryEventBus.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<EmittedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get all captured events.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.guard().clone()
    }

    /// Get events for a specific topic.
    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.guard()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    /// Clear all captured events.
    pub fn clear(&self) {
        self.guard().clear();
    }

    /// Get the number of captured events.
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Check if no events have been captured.
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        self.guard().push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_memory_event_bus() {
        let bus = InMemoryEventBus::new();

        bus.emit("lightSensorChange", json!({"illuminance": 10.0}));
        bus.emit("other", json!({}));
        bus.emit("lightSensorChange", json!({"illuminance": 20.0}));

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.events_for("lightSensorChange").len(), 2);
        assert_eq!(bus.events_for("other").len(), 1);
        assert!(bus.events_for("missing").is_empty());
    }

    #[test]
    fn test_in_memory_event_bus_clear() {
        let bus = InMemoryEventBus::new();
        bus.emit("lightSensorChange", json!({}));
        assert!(!bus.is_empty());

        bus.clear();
        assert!(bus.is_empty());
    }

    #[test]
    fn test_composite_forwards_to_every_bus() {
        let first = Arc::new(InMemoryEventBus::new());
        let second = Arc::new(InMemoryEventBus::new());
        let composite = CompositeEventBus::new()
            .with(first.clone())
            .with(second.clone());

        composite.emit("lightSensorChange", json!({"illuminance": 1.5}));

        assert_eq!(first.events(), second.events());
        assert_eq!(first.events()[0].payload, json!({"illuminance": 1.5}));
    }

    #[test]
    fn test_empty_composite_is_a_no_op() {
        let composite = CompositeEventBus::new();
        assert!(composite.is_empty());
        composite.emit("lightSensorChange", json!({}));
    }
}
