//! Multi-subscriber listener registry.
//!
//! Implements [`EventBus`] by fanning each event out to every callback
//! registered for its topic. Registration hands back a [`ListenerHandle`]
//! that removes exactly that callback.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::EventBus;

/// Callback invoked with the JSON payload of a matching event.
pub type ListenerCallback = Arc<dyn Fn(&serde_json::Value) + Send + Sync + 'static>;

/// Unique identifier of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(uuid::Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

struct Entry {
    id: ListenerId,
    topic: String,
    callback: ListenerCallback,
}

#[derive(Default)]
struct Inner {
    entries: Mutex<Vec<Entry>>,
}

impl Inner {
    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }
}

/// Registry of event listeners, cheap to clone.
#[derive(Default, Clone)]
pub struct ListenerRegistry {
    inner: Arc<Inner>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events named `topic`.
    pub fn add<F>(&self, topic: impl Into<String>, callback: F) -> ListenerHandle
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        let topic = topic.into();
        tracing::debug!(%id, %topic, "listener_added");
        self.inner.entries().push(Entry {
            id,
            topic,
            callback: Arc::new(callback),
        });
        ListenerHandle {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Remove one listener by id. Returns whether it was registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        self.inner.remove(id)
    }

    /// Remove every listener for every topic.
    pub fn remove_all(&self) {
        let removed = {
            let mut entries = self.inner.entries();
            let n = entries.len();
            entries.clear();
            n
        };
        tracing::debug!(removed, "listeners_cleared");
    }

    /// Number of listeners registered for `topic`.
    pub fn count(&self, topic: &str) -> usize {
        self.inner
            .entries()
            .iter()
            .filter(|e| e.topic == topic)
            .count()
    }

    /// Check if no listeners are registered for any topic.
    pub fn is_empty(&self) -> bool {
        self.inner.entries().is_empty()
    }
}

impl EventBus for ListenerRegistry {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        // Snapshot under the lock, call outside it: callbacks may add or
        // remove listeners.
        let callbacks: Vec<ListenerCallback> = self
            .inner
            .entries()
            .iter()
            .filter(|e| e.topic == topic)
            .map(|e| Arc::clone(&e.callback))
            .collect();

        for callback in callbacks {
            callback(&payload);
        }
    }
}

/// Disposable registration returned by [`ListenerRegistry::add`].
///
/// Dropping the handle does not remove the listener; call [`remove`](Self::remove).
#[derive(Debug, Clone)]
pub struct ListenerHandle {
    id: ListenerId,
    registry: Weak<Inner>,
}

impl ListenerHandle {
    /// Get the id of the listener this handle removes.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Deregister this listener. Returns false if it was already gone.
    pub fn remove(&self) -> bool {
        match self.registry.upgrade() {
            Some(inner) => inner.remove(self.id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&serde_json::Value) + Send + Sync + 'static) {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        (hits, move |_: &serde_json::Value| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_fan_out_to_all_listeners_of_topic() {
        let registry = ListenerRegistry::new();
        let (a, cb_a) = counter();
        let (b, cb_b) = counter();
        let (other, cb_other) = counter();
        registry.add("lightSensorChange", cb_a);
        registry.add("lightSensorChange", cb_b);
        registry.add("somethingElse", cb_other);

        registry.emit("lightSensorChange", json!({"illuminance": 3.0}));

        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(other.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handle_removes_only_its_listener() {
        let registry = ListenerRegistry::new();
        let (a, cb_a) = counter();
        let (b, cb_b) = counter();
        let handle_a = registry.add("lightSensorChange", cb_a);
        registry.add("lightSensorChange", cb_b);

        assert!(handle_a.remove());
        assert!(!handle_a.remove(), "second removal is a no-op");
        registry.emit("lightSensorChange", json!({}));

        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(registry.count("lightSensorChange"), 1);
    }

    #[test]
    fn test_remove_all() {
        let registry = ListenerRegistry::new();
        let (a, cb_a) = counter();
        registry.add("lightSensorChange", cb_a);
        registry.add("other", |_: &serde_json::Value| {});

        registry.remove_all();
        registry.emit("lightSensorChange", json!({}));

        assert!(registry.is_empty());
        assert_eq!(a.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handle_outliving_registry() {
        let registry = ListenerRegistry::new();
        let handle = registry.add("lightSensorChange", |_: &serde_json::Value| {});
        drop(registry);
        assert!(!handle.remove());
    }

    #[test]
    fn test_callback_may_remove_itself() {
        let registry = ListenerRegistry::new();
        let slot: Arc<Mutex<Option<ListenerHandle>>> = Arc::new(Mutex::new(None));
        let slot_clone = Arc::clone(&slot);
        let handle = registry.add("lightSensorChange", move |_: &serde_json::Value| {
            if let Some(h) = slot_clone.lock().unwrap().take() {
                h.remove();
            }
        });
        *slot.lock().unwrap() = Some(handle);

        registry.emit("lightSensorChange", json!({}));
        assert!(registry.is_empty());
    }
}
