/// Pausable scene clock fed by host frame timestamps.
///
/// Scene time only advances between two consecutive unpaused ticks. The first
/// tick after construction or resume rebases on the host timestamp, so time
/// spent paused (or a backgrounded tab) never makes transitions jump.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    now_ms: f64,
    last_host_ms: Option<f64>,
    paused: bool,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scene time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances with a host timestamp and returns the scene-time delta.
    pub fn tick(&mut self, host_ms: f64) -> f64 {
        if !host_ms.is_finite() || self.paused {
            return 0.0;
        }
        let (delta, latest) = match self.last_host_ms {
            Some(last) if host_ms > last => (host_ms - last, host_ms),
            Some(last) => (0.0, last),
            None => (0.0, host_ms),
        };
        self.last_host_ms = Some(latest);
        self.now_ms += delta;
        delta
    }

    /// Advances scene time directly, ignoring host timestamps.
    pub fn advance(&mut self, delta_ms: f64) {
        if !self.paused && delta_ms.is_finite() && delta_ms > 0.0 {
            self.now_ms += delta_ms;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_host_ms = None;
        }
    }
}
