use crate::core::SleepResult;
use std::time::Duration;

const MIN_PERIOD_MS: u32 = 1;
const MAX_PERIOD_MS: u32 = 16;

/// Rounds a requested scheduler period up to whole milliseconds, clamped to 1..=16.
pub fn period_millis(period: Duration) -> u32 {
    let rounded = period.saturating_add(Duration::from_nanos(999_999)).as_millis();
    u32::try_from(rounded)
        .unwrap_or(MAX_PERIOD_MS)
        .clamp(MIN_PERIOD_MS, MAX_PERIOD_MS)
}

/// Holds a raised system timer resolution for as long as it lives.
///
/// Sleeps in this crate are correct without it; it only narrows how far a
/// coarse sleep overshoots. On platforms without a global timer period this
/// is an inert guard.
#[derive(Debug)]
pub struct TimerResolution {
    period_ms: u32,
    active: bool,
}

impl TimerResolution {
    pub fn raise(period: Duration) -> SleepResult<Self> {
        let period_ms = period_millis(period);
        let active = begin_period(period_ms)?;
        if active {
            tracing::debug!(period_ms, "raised system timer resolution");
        }
        Ok(Self { period_ms, active })
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(u64::from(self.period_ms))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for TimerResolution {
    fn drop(&mut self) {
        if self.active
            && let Err(e) = end_period(self.period_ms)
        {
            tracing::warn!(period_ms = self.period_ms, error = %e, "failed to restore timer resolution");
        }
    }
}

#[cfg(windows)]
fn begin_period(period_ms: u32) -> SleepResult<bool> {
    use crate::core::SleepError;
    use windows::Win32::Media::{TIMERR_NOERROR, timeBeginPeriod};

    let result = unsafe { timeBeginPeriod(period_ms) };
    if result != TIMERR_NOERROR {
        return Err(SleepError::ResolutionError(format!(
            "timeBeginPeriod({}) returned {}",
            period_ms, result
        )));
    }
    Ok(true)
}

#[cfg(windows)]
fn end_period(period_ms: u32) -> SleepResult<()> {
    use crate::core::SleepError;
    use windows::Win32::Media::{TIMERR_NOERROR, timeEndPeriod};

    let result = unsafe { timeEndPeriod(period_ms) };
    if result != TIMERR_NOERROR {
        return Err(SleepError::ResolutionError(format!(
            "timeEndPeriod({}) returned {}",
            period_ms, result
        )));
    }
    Ok(())
}

#[cfg(not(windows))]
fn begin_period(_period_ms: u32) -> SleepResult<bool> {
    Ok(false)
}

#[cfg(not(windows))]
fn end_period(_period_ms: u32) -> SleepResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_rounding() {
        assert_eq!(period_millis(Duration::ZERO), 1);
        assert_eq!(period_millis(Duration::from_micros(1)), 1);
        assert_eq!(period_millis(Duration::from_micros(1001)), 2);
        assert_eq!(period_millis(Duration::from_millis(4)), 4);
        assert_eq!(period_millis(Duration::from_secs(1)), 16);
        assert_eq!(period_millis(Duration::MAX), 16);
    }

    #[test]
    fn test_guard_reports_period() {
        let guard = TimerResolution::raise(Duration::from_millis(1)).unwrap();
        assert_eq!(guard.period(), Duration::from_millis(1));
        assert_eq!(guard.is_active(), cfg!(windows));
    }
}
