use crate::sleep::context::ThreadContext;
use std::thread;
use std::time::Duration;

/// Sleep that must not overshoot by more than a small bounded margin.
///
/// Delegates as much of the wait as is safe to the finest OS primitive
/// available, measuring what each OS sleep really costs on this thread, then
/// spins out the remainder. Never returns before `duration` has elapsed.
pub struct DeadlineSleep;

impl DeadlineSleep {
    pub fn sleep(duration: Duration) {
        ThreadContext::with(|ctx| ctx.adaptive_sleep(duration));
    }
}

/// The finest-grained OS sleep available, with its native overshoot.
///
/// Finer than `std::thread::sleep` where the platform offers a high-resolution
/// timer, but no spin tail: short requests may still overshoot noticeably.
pub struct PreciseSleep;

impl PreciseSleep {
    pub fn sleep(duration: Duration) {
        ThreadContext::with(|ctx| ctx.coarse_sleep(duration));
    }
}

/// Plain `std::thread::sleep`, for when precision does not matter.
pub struct RelaxedSleep;

impl RelaxedSleep {
    #[inline]
    pub fn sleep(duration: Duration) {
        thread::sleep(duration);
    }
}

pub fn deadline_sleep(duration: Duration) {
    DeadlineSleep::sleep(duration);
}

pub fn precise_sleep(duration: Duration) {
    PreciseSleep::sleep(duration);
}

pub fn relaxed_sleep(duration: Duration) {
    RelaxedSleep::sleep(duration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_deadline_never_early() {
        for us in [0u64, 1, 50, 500, 2_500, 8_000] {
            let target = Duration::from_micros(us);
            let start = Instant::now();
            deadline_sleep(target);
            assert!(start.elapsed() >= target);
        }
    }

    #[test]
    fn test_precise_and_relaxed_never_early() {
        let target = Duration::from_micros(1_200);

        let start = Instant::now();
        precise_sleep(target);
        assert!(start.elapsed() >= target);

        let start = Instant::now();
        relaxed_sleep(target);
        assert!(start.elapsed() >= target);
    }

    #[test]
    fn test_deadline_updates_thread_average() {
        deadline_sleep(Duration::from_millis(20));
        let (len, average) = ThreadContext::with(|ctx| {
            (ctx.engine().tracker().len(), ctx.engine().average())
        });
        assert!(len > 1);
        assert!(average > Duration::ZERO);
    }
}
