use crate::bench::report::{BenchReport, KindResult, TrialResult, WaitResult};
use crate::clock::{Clock, MonotonicClock};
use crate::config::BenchSettings;
use crate::core::{SleepKind, SleepResult};
use crate::platform::TimerResolution;
use crate::sleep::{Capability, deadline_sleep, precise_sleep, relaxed_sleep};
use std::thread;
use std::time::Duration;

pub struct BenchRunner {
    settings: BenchSettings,
}

impl BenchRunner {
    pub fn new(settings: BenchSettings) -> SleepResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &BenchSettings {
        &self.settings
    }

    pub fn run(&self) -> BenchReport {
        let resolution = if self.settings.raise_timer_resolution {
            match TimerResolution::raise(Duration::from_millis(1)) {
                Ok(guard) => Some(guard),
                Err(e) => {
                    tracing::warn!(error = %e, "could not raise timer resolution");
                    None
                }
            }
        } else {
            None
        };

        let capability = Capability::get();
        let waits = self
            .settings
            .wait_times()
            .map(|target| self.run_wait(target))
            .collect();

        BenchReport {
            strategy: capability.strategy(),
            os_version: capability.os_version().map(|v| v.to_string()),
            timer_resolution_raised: resolution.as_ref().is_some_and(|r| r.is_active()),
            waits,
        }
    }

    fn run_wait(&self, target: Duration) -> WaitResult {
        let kinds = self
            .settings
            .kinds
            .iter()
            .map(|&kind| KindResult {
                kind,
                trials: (0..self.settings.trials)
                    .map(|_| run_trial(kind, target))
                    .collect(),
            })
            .collect();

        WaitResult {
            wait_time_us: u64::try_from(target.as_micros()).unwrap_or(u64::MAX),
            kinds,
        }
    }
}

pub fn sleep_with(kind: SleepKind, duration: Duration) {
    match kind {
        SleepKind::Std => thread::sleep(duration),
        SleepKind::Relaxed => relaxed_sleep(duration),
        SleepKind::Precise => precise_sleep(duration),
        SleepKind::Deadline => deadline_sleep(duration),
    }
}

pub fn run_trial(kind: SleepKind, target: Duration) -> TrialResult {
    // Start each trial on a fresh time slice.
    thread::yield_now();

    let clock = MonotonicClock;
    let start = clock.now();
    sleep_with(kind, target);
    TrialResult::measure(target, clock.elapsed_since(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SleepError;

    #[test]
    fn test_runner_covers_every_combination() {
        let settings = BenchSettings {
            wait_times_us: vec![1, 300],
            trials: 2,
            kinds: SleepKind::all().to_vec(),
            raise_timer_resolution: false,
        };

        let report = BenchRunner::new(settings).unwrap().run();

        assert_eq!(report.waits.len(), 2);
        assert_eq!(report.strategy, Capability::get().strategy());
        assert!(!report.timer_resolution_raised);
        for wait in &report.waits {
            assert_eq!(wait.kinds.len(), 4);
            for kind in &wait.kinds {
                assert_eq!(kind.trials.len(), 2);
                for trial in &kind.trials {
                    assert!(trial.elapsed_us >= wait.wait_time_us);
                }
            }
        }
    }

    #[test]
    fn test_runner_rejects_invalid_settings() {
        let settings = BenchSettings {
            kinds: Vec::new(),
            ..BenchSettings::default()
        };
        assert!(matches!(BenchRunner::new(settings), Err(SleepError::ConfigError(_))));
    }

    #[test]
    fn test_report_serializes() {
        let settings = BenchSettings {
            wait_times_us: vec![10],
            trials: 1,
            kinds: vec![SleepKind::Deadline],
            raise_timer_resolution: true,
        };
        let report = BenchRunner::new(settings).unwrap().run();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"deadline\""));
        let back: BenchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.waits.len(), 1);
    }
}
