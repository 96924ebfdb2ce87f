//! Listening state of a backend.

use crate::model::DEFAULT_UPDATE_INTERVAL_MS;

/// Whether a backend is listening, and at which sampling period.
///
/// Only [`NativeBackend`](crate::NativeBackend) moves it between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSession {
    is_listening: bool,
    update_interval_micros: u32,
}

impl Default for SensorSession {
    fn default() -> Self {
        Self {
            is_listening: false,
            update_interval_micros: millis_to_micros(DEFAULT_UPDATE_INTERVAL_MS),
        }
    }
}

impl SensorSession {
    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    /// Sampling period of the current (or last) registration.
    pub fn update_interval_micros(&self) -> u32 {
        self.update_interval_micros
    }

    pub(crate) fn activate(&mut self, interval_micros: u32) {
        self.is_listening = true;
        self.update_interval_micros = interval_micros;
    }

    /// Returns whether the session was active.
    pub(crate) fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.is_listening, false)
    }
}

/// Largest sampling period the OS sensor API accepts (a Java `int`).
pub const MAX_SAMPLING_PERIOD_US: u32 = i32::MAX as u32;

/// Sampling period unit expected by the OS sensor API, clamped to
/// [`MAX_SAMPLING_PERIOD_US`].
pub fn millis_to_micros(ms: u32) -> u32 {
    ms.saturating_mul(1000).min(MAX_SAMPLING_PERIOD_US)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_inactive_at_200ms() {
        let session = SensorSession::default();
        assert!(!session.is_listening());
        assert_eq!(session.update_interval_micros(), 200_000);
    }

    #[test]
    fn test_activate_deactivate() {
        let mut session = SensorSession::default();
        session.activate(500_000);
        assert!(session.is_listening());
        assert_eq!(session.update_interval_micros(), 500_000);

        assert!(session.deactivate());
        assert!(!session.deactivate());
        assert_eq!(session.update_interval_micros(), 500_000);
    }

    #[test]
    fn test_millis_to_micros_clamps_to_java_int() {
        assert_eq!(millis_to_micros(16), 16_000);
        assert_eq!(millis_to_micros(2_147_483), 2_147_483_000);
        assert_eq!(millis_to_micros(2_147_484), MAX_SAMPLING_PERIOD_US);
        assert_eq!(millis_to_micros(u32::MAX), i32::MAX as u32);
    }
}
