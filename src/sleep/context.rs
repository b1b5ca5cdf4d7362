use crate::clock::MonotonicClock;
use crate::core::CoarseStrategy;
use crate::sleep::capability::Capability;
use crate::sleep::engine::AdaptiveSleeper;
use crate::sleep::primitive::{CoarseSleep, StandardSleep};
use std::cell::RefCell;
use std::time::Duration;

/// Per-thread sleep state: the adaptive engine and the lazily created coarse
/// primitive (for the waitable-timer strategy, the thread's timer handle).
///
/// Lives in a thread local. Both parts are created on first use by the thread
/// and dropped when it exits, which closes any OS handle.
pub struct ThreadContext {
    strategy: CoarseStrategy,
    engine: AdaptiveSleeper,
    coarse: Option<Box<dyn CoarseSleep>>,
}

thread_local! {
    static CONTEXT: RefCell<ThreadContext> = RefCell::new(ThreadContext::new(Capability::get().strategy()));
}

impl ThreadContext {
    pub fn new(strategy: CoarseStrategy) -> Self {
        tracing::debug!(%strategy, thread = ?std::thread::current().id(), "created sleep context");
        Self {
            strategy,
            engine: AdaptiveSleeper::new(),
            coarse: None,
        }
    }

    /// Runs `f` against the calling thread's context.
    pub fn with<R>(f: impl FnOnce(&mut ThreadContext) -> R) -> R {
        CONTEXT.with(|ctx| f(&mut ctx.borrow_mut()))
    }

    pub fn strategy(&self) -> CoarseStrategy {
        self.strategy
    }

    pub fn engine(&self) -> &AdaptiveSleeper {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AdaptiveSleeper {
        &mut self.engine
    }

    pub fn has_primitive(&self) -> bool {
        self.coarse.is_some()
    }

    /// One coarse sleep on the best primitive, no averaging.
    pub fn coarse_sleep(&mut self, duration: Duration) {
        let strategy = self.strategy;
        self.coarse
            .get_or_insert_with(|| instantiate(strategy))
            .coarse_sleep(duration);
    }

    /// Adaptive sleep delegating coarse chunks to the best primitive.
    pub fn adaptive_sleep(&mut self, duration: Duration) {
        let strategy = self.strategy;
        let coarse = self.coarse.get_or_insert_with(|| instantiate(strategy));
        self.engine.sleep(duration, coarse, &MonotonicClock);
    }
}

fn instantiate(strategy: CoarseStrategy) -> Box<dyn CoarseSleep> {
    match strategy {
        #[cfg(windows)]
        CoarseStrategy::WaitableTimer => match crate::sleep::win::WaitableTimer::new() {
            Ok(timer) => Box::new(timer),
            Err(e) => timer_unavailable(e),
        },
        #[cfg(unix)]
        CoarseStrategy::Interval => Box::new(crate::sleep::unix::IntervalSleep),
        _ => Box::new(StandardSleep),
    }
}

#[cfg(windows)]
#[cold]
fn timer_unavailable(err: crate::core::SleepError) -> ! {
    panic!("high-resolution waitable timer unavailable after capability check: {err}");
}
