//! In-memory stand-in for the OS sensor subsystem.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::manager::{RawEventCallback, RawSensorEvent, SensorHandle, SensorManager};

struct Registration {
    interval_us: u32,
    callback: RawEventCallback,
}

#[derive(Default)]
struct Inner {
    sensor: Option<SensorHandle>,
    fail_registration: AtomicBool,
    registration: Mutex<Option<Registration>>,
    last_callback: Mutex<Option<RawEventCallback>>,
    register_calls: AtomicUsize,
    unregister_calls: AtomicUsize,
}

/// Fake [`SensorManager`]. Clones share state, so a test can keep one
/// clone to drive events while a backend owns another.
#[derive(Clone)]
pub struct FakeSensorManager {
    inner: Arc<Inner>,
}

impl FakeSensorManager {
    pub fn with_light_sensor() -> Self {
        Self::new(Some(SensorHandle {
            name: "Fake Ambient Light".to_string(),
            vendor: Some("lumen".to_string()),
            max_range: Some(40_000.0),
        }))
    }

    pub fn without_sensor() -> Self {
        Self::new(None)
    }

    fn new(sensor: Option<SensorHandle>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sensor,
                ..Default::default()
            }),
        }
    }

    fn registration(&self) -> MutexGuard<'_, Option<Registration>> {
        self.inner
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Make subsequent registrations report failure.
    pub fn fail_registrations(&self, fail: bool) {
        self.inner.fail_registration.store(fail, Ordering::SeqCst);
    }

    pub fn is_registered(&self) -> bool {
        self.registration().is_some()
    }

    pub fn registered_interval_us(&self) -> Option<u32> {
        self.registration().as_ref().map(|r| r.interval_us)
    }

    pub fn register_calls(&self) -> usize {
        self.inner.register_calls.load(Ordering::SeqCst)
    }

    pub fn unregister_calls(&self) -> usize {
        self.inner.unregister_calls.load(Ordering::SeqCst)
    }

    /// Fire an event the way the OS would. Returns whether a listener was
    /// registered to receive it.
    pub fn fire(&self, event: RawSensorEvent) -> bool {
        let callback = self.registration().as_ref().map(|r| Arc::clone(&r.callback));
        match callback {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }

    /// Fire an event at the most recently registered callback, even if it
    /// has since been unregistered, the way the OS may still deliver an
    /// event queued before `unregister_listener` returned. Returns false if
    /// nothing was ever registered.
    pub fn fire_late(&self, event: RawSensorEvent) -> bool {
        let callback = self
            .inner
            .last_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match callback {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }
}

impl SensorManager for FakeSensorManager {
    fn default_light_sensor(&self) -> Option<SensorHandle> {
        self.inner.sensor.clone()
    }

    fn register_listener(
        &self,
        _sensor: &SensorHandle,
        sampling_period_us: u32,
        callback: RawEventCallback,
    ) -> bool {
        self.inner.register_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_registration.load(Ordering::SeqCst) {
            return false;
        }
        *self
            .inner
            .last_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&callback));
        *self.registration() = Some(Registration {
            interval_us: sampling_period_us,
            callback,
        });
        true
    }

    fn unregister_listener(&self) {
        self.inner.unregister_calls.fetch_add(1, Ordering::SeqCst);
        *self.registration() = None;
    }
}
