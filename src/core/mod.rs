pub mod error;
pub mod types;

pub use error::{SleepError, SleepResult};
pub use types::{CoarseStrategy, SleepKind, Version};
