use crate::core::SleepError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Windows 10 RS4 (1803), the first build with high-resolution waitable timers.
    pub const WINDOWS_10_RS4: Version = Version::new(10, 0, 17134);

    pub fn parse(s: &str) -> Result<Self, SleepError> {
        let s = s.trim().trim_start_matches('v').trim_start_matches('V');

        let parts: Vec<&str> = s.split('.').collect();
        if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(SleepError::VersionError(format!("Invalid format: {}", s)));
        }

        let number = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| SleepError::VersionError(format!("Invalid number: {}", part)))
        };

        let major = number(parts[0])?;
        let minor = parts.get(1).map(|p| number(*p)).transpose()?.unwrap_or(0);
        let patch = parts.get(2).map(|p| number(*p)).transpose()?.unwrap_or(0);

        Ok(Self::new(major, minor, patch))
    }

    pub fn is_at_least(&self, other: &Version) -> bool {
        self >= other
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => match self.minor.cmp(&other.minor) {
                Ordering::Equal => self.patch.cmp(&other.patch),
                other => other,
            },
            other => other,
        }
    }
}

/// Which OS primitive backs a coarse sleep, most precise first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoarseStrategy {
    WaitableTimer,
    Interval,
    Standard,
}

impl fmt::Display for CoarseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitableTimer => write!(f, "waitable-timer"),
            Self::Interval => write!(f, "interval"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

impl std::str::FromStr for CoarseStrategy {
    type Err = SleepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "waitable-timer" | "waitable_timer" => Ok(Self::WaitableTimer),
            "interval" => Ok(Self::Interval),
            "standard" => Ok(Self::Standard),
            other => Err(SleepError::InvalidInput(format!(
                "Unknown coarse strategy: {}",
                other
            ))),
        }
    }
}

impl CoarseStrategy {
    pub const fn all() -> &'static [Self] {
        &[Self::WaitableTimer, Self::Interval, Self::Standard]
    }

    /// Whether this build carries an implementation of the strategy at all.
    pub const fn is_compiled_in(&self) -> bool {
        match self {
            Self::WaitableTimer => cfg!(windows),
            Self::Interval => cfg!(unix),
            Self::Standard => true,
        }
    }
}

/// The sleep implementations the benchmark harness can compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepKind {
    Std,
    Relaxed,
    Precise,
    Deadline,
}

impl fmt::Display for SleepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Std => write!(f, "std::thread::sleep"),
            Self::Relaxed => write!(f, "hrsleep::relaxed_sleep"),
            Self::Precise => write!(f, "hrsleep::precise_sleep"),
            Self::Deadline => write!(f, "hrsleep::deadline_sleep"),
        }
    }
}

impl SleepKind {
    pub const fn all() -> &'static [Self] {
        &[Self::Std, Self::Relaxed, Self::Precise, Self::Deadline]
    }
}
