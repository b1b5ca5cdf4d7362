use std::thread;
use std::time::Duration;

/// Suspends the calling thread for roughly `duration`.
///
/// Implementations hand the wait to the OS and return whenever the scheduler
/// resumes the thread. They may overshoot by an unpredictable amount and
/// callers must not treat the return as exact.
pub trait CoarseSleep {
    fn coarse_sleep(&mut self, duration: Duration);
}

impl<S: CoarseSleep + ?Sized> CoarseSleep for Box<S> {
    fn coarse_sleep(&mut self, duration: Duration) {
        (**self).coarse_sleep(duration)
    }
}

/// `std::thread::sleep`, the fallback when nothing finer exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardSleep;

impl CoarseSleep for StandardSleep {
    #[inline]
    fn coarse_sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_standard_sleep_never_returns_early() {
        let mut sleeper = StandardSleep;
        for us in [0u64, 50, 500, 2_000] {
            let target = Duration::from_micros(us);
            let start = Instant::now();
            sleeper.coarse_sleep(target);
            assert!(start.elapsed() >= target);
        }
    }

    #[test]
    fn test_boxed_dispatch() {
        let mut boxed: Box<dyn CoarseSleep> = Box::new(StandardSleep);
        let start = Instant::now();
        boxed.coarse_sleep(Duration::from_micros(100));
        assert!(start.elapsed() >= Duration::from_micros(100));
    }
}
