use std::time::{Duration, Instant};

/// A monotonic time source. Only differences between two readings mean anything.
pub trait Clock {
    fn now(&self) -> Instant;

    fn elapsed_since(&self, start: Instant) -> Duration {
        self.now().saturating_duration_since(start)
    }
}

/// The process monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}


#[cfg(test)]
mod tests {
    use super::manual::ManualClock;
    use super::*;

    #[test]
    fn test_monotonic_never_decreases() {
        let clock = MonotonicClock;
        let mut last = clock.now();
        for _ in 0..10_000 {
            let next = clock.now();
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn test_manual_clock_ticks_per_read() {
        let clock = ManualClock::new(Duration::from_micros(10));
        let a = clock.now();
        let b = clock.now();
        assert_eq!(b - a, Duration::from_micros(10));

        clock.advance(Duration::from_millis(1));
        assert_eq!(clock.elapsed_since(a), Duration::from_micros(1020));
        assert_eq!(clock.reads(), 3);
    }
}
