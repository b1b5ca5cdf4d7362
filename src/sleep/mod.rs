pub mod capability;
pub mod context;
pub mod engine;
pub mod policy;
pub mod primitive;
pub mod tracker;

#[cfg(unix)]
pub mod unix;
#[cfg(windows)]
pub mod win;

pub use capability::{Capability, STRATEGY_ENV};
pub use context::ThreadContext;
pub use engine::AdaptiveSleeper;
pub use policy::{
    DeadlineSleep, PreciseSleep, RelaxedSleep, deadline_sleep, precise_sleep, relaxed_sleep,
};
pub use primitive::{CoarseSleep, StandardSleep};
pub use tracker::RingAverage;

#[cfg(unix)]
pub use unix::IntervalSleep;
#[cfg(windows)]
pub use win::WaitableTimer;
