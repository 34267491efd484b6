//! Trailing-edge debounce for scroll-triggered page loads.

use std::time::Duration;

use tokio::time::Instant;

/// Coalesces bursts of triggers into a single firing.
///
/// Each [`trigger`](Debouncer::trigger) (re)schedules the deadline to
/// `now + delay`; [`fire`](Debouncer::fire) reports `true` exactly once per
/// scheduled deadline once it has passed. At most one firing is pending.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Consumes the pending deadline if it has elapsed at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn does_not_fire_without_trigger() {
        let mut debouncer = Debouncer::new(DELAY);
        assert!(!debouncer.fire(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.trigger(start);

        assert!(!debouncer.fire(start + Duration::from_millis(299)));
        assert!(debouncer.fire(start + DELAY));
        assert!(!debouncer.fire(start + Duration::from_secs(5)), "must fire only once");
    }

    #[test]
    fn burst_of_triggers_reschedules_a_single_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        for step in 0..5u64 {
            debouncer.trigger(start + Duration::from_millis(step * 100));
        }

        let last = start + Duration::from_millis(400);
        assert_eq!(debouncer.deadline(), Some(last + DELAY));
        assert!(!debouncer.fire(start + DELAY), "earlier deadlines were superseded");
        assert!(debouncer.fire(last + DELAY));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_drops_pending_firing() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.trigger(start);
        debouncer.cancel();
        assert!(!debouncer.fire(start + DELAY));
    }
}
