pub mod bench;
pub mod engine;

pub use bench::{BenchSettings, BenchSettingsManager};
pub use engine::{EngineConfig, RING_CAPACITY};
