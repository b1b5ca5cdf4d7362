pub mod resolution;
pub mod version;

pub use resolution::TimerResolution;
pub use version::{is_windows_version_or_later, os_version};
