use std::time::{Duration, Instant};

pub const MIN_INTERVAL_SECS: u64 = 1;
/// Keeps at least one wake inside every calendar minute, even with jitter.
pub const MAX_INTERVAL_SECS: u64 = 30;

/// Fixed-period wake-up driving the reminder clock from the UI loop.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    /// The first tick is due immediately.
    pub fn new(interval_secs: u64, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs(clamp_interval(interval_secs)),
            next: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next tick, zero if one is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Consumes a due tick. Missed periods collapse into a single tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}

pub fn clamp_interval(secs: u64) -> u64 {
    secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_clamped() {
        assert_eq!(clamp_interval(0), 1);
        assert_eq!(clamp_interval(15), 15);
        assert_eq!(clamp_interval(60), 30);
    }

    #[test]
    fn first_tick_is_immediate_then_periodic() {
        let start = Instant::now();
        let mut ticker = Ticker::new(10, start);

        assert!(ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_secs(5)));
        assert_eq!(
            ticker.until_next(start + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
        assert!(ticker.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn missed_ticks_collapse() {
        let start = Instant::now();
        let mut ticker = Ticker::new(10, start);
        assert!(ticker.poll(start));

        let late = start + Duration::from_secs(95);
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.until_next(late), Duration::from_secs(10));
    }
}
