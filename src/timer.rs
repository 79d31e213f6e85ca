use std::time::{Duration, Instant};

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Real-time tick source, polled once per cycle.
#[derive(Debug)]
pub struct Timer {
  period: Duration,
  last: Instant,
}

impl Timer {
  pub fn new(period: Duration) -> Timer {
    Timer {
      period,
      last: Instant::now(),
    }
  }

  /// Restart the period from `now`.
  pub fn reset(&mut self, now: Instant) {
    self.last = now;
  }

  /// Return true if a full period has elapsed since the last tick.
  pub fn poll(&mut self, now: Instant) -> bool {
    if now.saturating_duration_since(self.last) >= self.period {
      self.last = now;
      true
    } else {
      false
    }
  }
}

impl Default for Timer {
  fn default() -> Timer {
    Timer::new(DEFAULT_PERIOD)
  }
}
