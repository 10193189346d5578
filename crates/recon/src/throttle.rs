use std::time::Duration;

use tracing::{trace, warn};

/// Floor for the pause after each lookup (≤ 2 requests/second).
pub const MIN_LOOKUP_DELAY: Duration = Duration::from_millis(500);

/// Fixed pause taken after every lookup, whatever its outcome.
///
/// Lookups are strictly serial, so a fixed post-request delay is enough to
/// stay under the authority's rate limit.
pub struct Throttle {
    delay: Duration,
    sleeper: Box<dyn FnMut(Duration)>,
}

impl Throttle {
    /// Throttle that blocks the current thread. `delay` below
    /// [`MIN_LOOKUP_DELAY`] is raised to the floor.
    pub fn new(delay: Duration) -> Self {
        Self::with_sleeper(delay, std::thread::sleep)
    }

    /// Throttle with a custom sleep function (tests record instead of sleeping).
    pub fn with_sleeper(delay: Duration, sleeper: impl FnMut(Duration) + 'static) -> Self {
        let delay = if delay < MIN_LOOKUP_DELAY {
            warn!(
                requested_ms = delay.as_millis() as u64,
                floor_ms = MIN_LOOKUP_DELAY.as_millis() as u64,
                "lookup delay below floor, using floor"
            );
            MIN_LOOKUP_DELAY
        } else {
            delay
        };

        Self {
            delay,
            sleeper: Box::new(sleeper),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Block for the configured delay.
    pub fn pause(&mut self) {
        trace!(delay_ms = self.delay.as_millis() as u64, "throttling");
        (self.sleeper)(self.delay);
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MIN_LOOKUP_DELAY)
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle").field("delay", &self.delay).finish()
    }
}
