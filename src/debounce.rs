//! Trailing-edge debounce window
//!
//! Pure timestamp arithmetic, no platform timers: the browser event layer
//! and the native polling driver both consult this to decide when a persist
//! is due. Timestamps are milliseconds on the `js_sys::Date::now()` scale.

/// At most one pending deadline; a new signal replaces (cancels) the old
/// window outright.
#[derive(Debug, Clone)]
pub struct DebounceWindow {
    interval_ms: f64,
    deadline: Option<f64>,
}

impl DebounceWindow {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            deadline: None,
        }
    }

    /// A qualifying signal arrived: drop any pending deadline and open a
    /// fresh window ending one full interval from now.
    pub fn signal(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.interval_ms);
    }

    /// Discard the pending window without firing
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a persist is currently scheduled
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending persist will fire, if one is scheduled
    #[inline]
    pub fn fires_at(&self) -> Option<f64> {
        self.deadline
    }

    /// Close the window once the quiet period has fully elapsed.
    /// Returns true (and clears the deadline) exactly once per window.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
