//! Redraw coalescing.
//!
//! Bursts of input (typing an expression, dragging to pan) schedule
//! many redraws; only one should happen, after a short quiet period.
//! The caller owns the clock: `schedule` re-arms the deadline and
//! `fire_due` reports when the quiet period has elapsed. No threads,
//! no timers — a deterministic fit for the single-threaded event loop.

use std::time::{Duration, Instant};

/// Default quiet period before a scheduled render fires
pub const DEFAULT_QUIET: Duration = Duration::from_millis(100);

/// Coalesces render requests behind a quiet-period deadline
#[derive(Debug, Clone)]
pub struct RenderDebouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Default for RenderDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}

impl RenderDebouncer {
    /// Creates a debouncer with the given quiet period
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Requests a render; any pending deadline is pushed back
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True when a render has been scheduled and not yet fired
    #[must_use]
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true (and clears the deadline) once the quiet period
    /// has elapsed; the caller renders exactly then.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending render
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_never_fires() {
        let mut d = RenderDebouncer::default();
        assert!(!d.pending());
        assert!(!d.fire_due(Instant::now()));
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let mut d = RenderDebouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        d.schedule(t0);

        assert!(!d.fire_due(t0 + Duration::from_millis(50)));
        assert!(d.fire_due(t0 + Duration::from_millis(100)));
        // deadline is consumed
        assert!(!d.fire_due(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_burst_coalesces_to_one_render() {
        let mut d = RenderDebouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        // rapid keystrokes every 30ms keep pushing the deadline
        for i in 0..5 {
            d.schedule(t0 + Duration::from_millis(30 * i));
        }

        // quiet period counts from the LAST request
        assert!(!d.fire_due(t0 + Duration::from_millis(150)));
        assert!(d.fire_due(t0 + Duration::from_millis(220)));
    }

    #[test]
    fn test_cancel() {
        let mut d = RenderDebouncer::default();
        let t0 = Instant::now();
        d.schedule(t0);
        d.cancel();
        assert!(!d.fire_due(t0 + Duration::from_secs(1)));
    }
}
