use crate::clock::Clock;
use crate::config::{EngineConfig, RING_CAPACITY};
use crate::sleep::primitive::CoarseSleep;
use crate::sleep::tracker::RingAverage;
use std::hint;
use std::time::Duration;

/// Adaptive coarse-then-spin sleeper.
///
/// Sleeps in fixed `min_sleep` chunks while the remaining time exceeds the
/// observed average cost of one chunk, then spins out the rest against the
/// clock. The average is per sleeper, so a sleeper belongs to one thread.
#[derive(Debug, Clone)]
pub struct AdaptiveSleeper {
    config: EngineConfig,
    chunk_cost: RingAverage<RING_CAPACITY>,
}

impl Default for AdaptiveSleeper {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptiveSleeper {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            chunk_cost: RingAverage::with_seed(config.seed()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current estimate of what one `min_sleep` chunk really costs.
    pub fn average(&self) -> Duration {
        self.chunk_cost.average()
    }

    pub fn tracker(&self) -> &RingAverage<RING_CAPACITY> {
        &self.chunk_cost
    }

    pub fn tracker_mut(&mut self) -> &mut RingAverage<RING_CAPACITY> {
        &mut self.chunk_cost
    }

    pub fn sleep<S, C>(&mut self, duration: Duration, coarse: &mut S, clock: &C)
    where
        S: CoarseSleep + ?Sized,
        C: Clock + ?Sized,
    {
        let mut remaining = duration;

        while remaining > self.chunk_cost.average() {
            let start = clock.now();
            coarse.coarse_sleep(self.config.min_sleep);
            let observed = clock.now().saturating_duration_since(start);

            self.chunk_cost.add(observed);
            remaining = remaining.saturating_sub(observed);
        }

        if self.chunk_cost.average() >= self.config.bad_sleep_average() {
            self.reseed();
        }

        let start = clock.now();
        while clock.now().saturating_duration_since(start) < remaining {
            hint::spin_loop();
        }
    }

    #[cold]
    fn reseed(&mut self) {
        tracing::warn!(
            average_us = self.chunk_cost.average().as_micros() as u64,
            threshold_us = self.config.bad_sleep_average().as_micros() as u64,
            "coarse sleep average diverged, reseeding"
        );
        // Without this the average stays above every request and the engine
        // degenerates into a pure spin loop.
        self.chunk_cost.clear();
        self.chunk_cost.add(self.config.seed());
    }
}
