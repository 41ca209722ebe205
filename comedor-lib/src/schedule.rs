//! Cancellable scheduled tasks.
//!
//! The engine is cooperative: nothing fires on its own. A [`Debouncer`]
//! holds at most one pending value with a deadline, and the host polls it
//! with the current time from a [`Clock`]. Tests drive time with
//! [`ManualClock`]; hosts with an async runtime sleep until
//! [`Debouncer::deadline`] and poll again.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock for deterministic tests.
///
/// Time only moves when [`advance`](Self::advance) is called. Clones share
/// the same time, so a test can keep one handle and give another to the
/// engine.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_nanos: Arc<AtomicU64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

struct Pending<T> {
    value: T,
    due: Instant,
}

/// Trailing-edge debouncer holding at most one pending value.
///
/// Scheduling a new value cancels the pending one and restarts the delay, so
/// only the last value of a burst is ever delivered.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use comedor_lib::schedule::{Clock, Debouncer, ManualClock};
///
/// let clock = ManualClock::new();
/// let mut debouncer = Debouncer::new(Duration::from_millis(300));
///
/// debouncer.schedule("a", clock.now());
/// clock.advance(Duration::from_millis(100));
/// debouncer.schedule("an", clock.now());
///
/// clock.advance(Duration::from_millis(299));
/// assert_eq!(debouncer.poll(clock.now()), None);
/// clock.advance(Duration::from_millis(1));
/// assert_eq!(debouncer.poll(clock.now()), Some("an"));
/// ```
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("deadline", &self.deadline())
            .finish()
    }
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period before a value fires.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay for values scheduled from now on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedules `value` to fire `delay` after `now`, cancelling any pending
    /// value. Returns the cancelled value.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let cancelled = self.pending.take().map(|p| p.value);
        if cancelled.is_some() {
            log::trace!("Debouncer: rescheduled, previous value cancelled");
        }
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
        cancelled
    }

    /// Cancels the pending value, if any, and returns it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Returns `true` while a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will fire.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Time left until the pending value fires (zero if overdue).
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|due| due.saturating_duration_since(now))
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_after_delay() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(DELAY);

        assert_eq!(debouncer.schedule(1, clock.now()), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.remaining(clock.now()), Some(DELAY));

        clock.advance(Duration::from_millis(299));
        assert_eq!(debouncer.poll(clock.now()), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.poll(clock.now()), Some(1));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(clock.now()), None);
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule("a", clock.now());
        clock.advance(Duration::from_millis(200));
        assert_eq!(debouncer.schedule("an", clock.now()), Some("a"));
        clock.advance(Duration::from_millis(200));
        assert_eq!(debouncer.schedule("ana", clock.now()), Some("an"));

        clock.advance(Duration::from_millis(200));
        assert_eq!(debouncer.poll(clock.now()), None);

        clock.advance(Duration::from_millis(100));
        assert_eq!(debouncer.poll(clock.now()), Some("ana"));
    }

    #[test]
    fn test_cancel() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule(5, clock.now());
        assert_eq!(debouncer.cancel(), Some(5));
        assert_eq!(debouncer.deadline(), None);

        clock.advance(DELAY);
        assert_eq!(debouncer.poll(clock.now()), None);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = other.now();

        clock.advance(Duration::from_secs(2));
        assert_eq!(other.now() - start, Duration::from_secs(2));
    }
}
