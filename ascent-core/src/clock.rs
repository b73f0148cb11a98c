//! Millisecond tick clock and timer schedules
//!
//! The clock is a 32-bit counter advanced by a 1 ms periodic event. It wraps
//! after ~49.7 days, so every comparison in this module is done on the
//! wrapping difference between two ticks, never on absolute values.

use portable_atomic::{AtomicU32, Ordering};

/// A point in time, in milliseconds since boot (modulo 2^32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick(pub u32);

impl Tick {
    /// Milliseconds elapsed from `earlier` to `self`
    ///
    /// Correct across a single counter wrap.
    pub fn since(self, earlier: Tick) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Tick `ms` milliseconds after this one
    pub fn after(self, ms: u32) -> Tick {
        Tick(self.0.wrapping_add(ms))
    }

    /// Check whether at least `ms` milliseconds have passed since `earlier`
    pub fn has_elapsed(self, earlier: Tick, ms: u32) -> bool {
        self.since(earlier) >= ms
    }
}

/// Monotonic millisecond counter shared between the timer interrupt and
/// the poll loop
///
/// A single atomic word, so reads never tear.
pub struct TickClock {
    ms: AtomicU32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock {
    /// Create a clock starting at zero
    pub const fn new() -> Self {
        Self {
            ms: AtomicU32::new(0),
        }
    }

    /// Advance by one period (called from the 1 ms timer event)
    pub fn advance(&self) {
        self.advance_by(1);
    }

    /// Advance by `ms` milliseconds, wrapping silently
    pub fn advance_by(&self, ms: u32) {
        // fetch_add wraps on overflow
        self.ms.fetch_add(ms, Ordering::Release);
    }

    /// Current time
    pub fn now(&self) -> Tick {
        Tick(self.ms.load(Ordering::Acquire))
    }
}

/// Fixed-period schedule polled from the main loop
///
/// Replaces blocking delays: the loop asks how many whole periods have
/// elapsed and the schedule re-arms itself on the period grid, so a late
/// poll never drifts the phase.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Periodic {
    period_ms: u32,
    last: Tick,
}

impl Periodic {
    /// Create a schedule whose first period starts at `now`
    pub fn new(period_ms: u32, now: Tick) -> Self {
        Self {
            period_ms: period_ms.max(1),
            last: now,
        }
    }

    /// Restart the period grid at `now`
    pub fn restart(&mut self, now: Tick) {
        self.last = now;
    }

    /// Number of whole periods elapsed since the last poll
    pub fn poll(&mut self, now: Tick) -> u32 {
        let elapsed = now.since(self.last);
        let periods = elapsed / self.period_ms;
        if periods > 0 {
            self.last = self.last.after(periods * self.period_ms);
        }
        periods
    }
}

/// Deferred expiry armed from the poll loop
///
/// Fires at most once per arming.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OneShot {
    armed_at: Option<Tick>,
    delay_ms: u32,
}

impl OneShot {
    /// Create a disarmed timer
    pub const fn new(delay_ms: u32) -> Self {
        Self {
            armed_at: None,
            delay_ms,
        }
    }

    /// Arm (or re-arm) the timer starting at `now`
    pub fn arm(&mut self, now: Tick) {
        self.armed_at = Some(now);
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        self.armed_at = None;
    }

    /// Check whether the timer is armed
    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Returns true once when the delay has elapsed, then disarms
    pub fn poll(&mut self, now: Tick) -> bool {
        match self.armed_at {
            Some(start) if now.has_elapsed(start, self.delay_ms) => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_since_across_wrap() {
        let before = Tick(u32::MAX - 4);
        let after = before.after(10);
        assert_eq!(after, Tick(5));
        assert_eq!(after.since(before), 10);
        assert!(after.has_elapsed(before, 10));
        assert!(!after.has_elapsed(before, 11));
    }

    #[test]
    fn test_clock_advance_wraps() {
        let clock = TickClock::new();
        clock.advance_by(u32::MAX);
        assert_eq!(clock.now(), Tick(u32::MAX));
        clock.advance();
        assert_eq!(clock.now(), Tick(0));
    }

    #[test]
    fn test_periodic_counts_whole_periods() {
        let mut p = Periodic::new(333, Tick(0));
        assert_eq!(p.poll(Tick(332)), 0);
        assert_eq!(p.poll(Tick(333)), 1);
        assert_eq!(p.poll(Tick(665)), 0);
        assert_eq!(p.poll(Tick(1332)), 3);
        // Phase stays on the 333 ms grid
        assert_eq!(p.poll(Tick(1333)), 0);
        assert_eq!(p.poll(Tick(1665)), 1);
    }

    #[test]
    fn test_periodic_across_wrap() {
        let start = Tick(u32::MAX - 500);
        let mut p = Periodic::new(1000, start);
        assert_eq!(p.poll(start.after(999)), 0);
        assert_eq!(p.poll(start.after(1000)), 1);
    }

    #[test]
    fn test_oneshot_fires_once() {
        let mut t = OneShot::new(1000);
        assert!(!t.poll(Tick(5000)));

        t.arm(Tick(100));
        assert!(t.is_armed());
        assert!(!t.poll(Tick(1099)));
        assert!(t.poll(Tick(1100)));
        assert!(!t.is_armed());
        assert!(!t.poll(Tick(3000)));
    }

    #[test]
    fn test_oneshot_cancel() {
        let mut t = OneShot::new(10);
        t.arm(Tick(0));
        t.cancel();
        assert!(!t.poll(Tick(100)));
    }
}
