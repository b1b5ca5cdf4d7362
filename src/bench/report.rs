use crate::core::{CoarseStrategy, SleepKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub fn percent_error(target: Duration, actual: Duration) -> f64 {
    let target = target.as_secs_f64();
    if target == 0.0 {
        return 0.0;
    }
    ((actual.as_secs_f64() - target) / target * 100.0).abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub elapsed_us: u64,
    pub error_us: i64,
    pub percent_error: f64,
}

impl TrialResult {
    pub fn measure(target: Duration, elapsed: Duration) -> Self {
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let target_us = i128::try_from(target.as_micros()).unwrap_or(i128::MAX);
        let error_us = i64::try_from(elapsed.as_micros() as i128 - target_us).unwrap_or(i64::MAX);

        Self {
            elapsed_us,
            error_us,
            percent_error: percent_error(target, elapsed),
        }
    }
}

impl fmt::Display for TrialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "elapsed: {} us, error: {} us ({:.2}%)",
            self.elapsed_us, self.error_us, self.percent_error
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindResult {
    pub kind: SleepKind,
    pub trials: Vec<TrialResult>,
}

impl KindResult {
    pub fn worst_error_us(&self) -> Option<i64> {
        self.trials.iter().map(|t| t.error_us).max()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitResult {
    pub wait_time_us: u64,
    pub kinds: Vec<KindResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    pub strategy: CoarseStrategy,
    pub os_version: Option<String>,
    pub timer_resolution_raised: bool,
    pub waits: Vec<WaitResult>,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "coarse strategy: {}", self.strategy)?;
        if let Some(version) = &self.os_version {
            writeln!(f, "os version: {}", version)?;
        }
        if self.timer_resolution_raised {
            writeln!(f, "system timer resolution raised")?;
        }

        for wait in &self.waits {
            writeln!(f)?;
            writeln!(f, "wait time: {} us", wait.wait_time_us)?;
            for kind in &wait.kinds {
                writeln!(f, "  {}", kind.kind)?;
                for trial in &kind.trials {
                    writeln!(f, "    {}", trial)?;
                }
            }
        }
        Ok(())
    }
}
