pub mod bench;
pub mod clock;
pub mod config;
pub mod core;
pub mod platform;
pub mod sleep;

pub use crate::core::{CoarseStrategy, SleepError, SleepKind, SleepResult, Version};

pub use config::{BenchSettings, BenchSettingsManager, EngineConfig};

pub use clock::{Clock, MonotonicClock};

pub use platform::TimerResolution;

pub use sleep::{
    AdaptiveSleeper, Capability, CoarseSleep, DeadlineSleep, PreciseSleep, RelaxedSleep,
    RingAverage, ThreadContext, deadline_sleep, precise_sleep, relaxed_sleep,
};

pub use bench::{BenchReport, BenchRunner};
