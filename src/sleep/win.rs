use crate::core::{SleepError, SleepResult};
use crate::sleep::primitive::CoarseSleep;
use std::time::Duration;
use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
use windows::Win32::System::Threading::{
    CREATE_WAITABLE_TIMER_HIGH_RESOLUTION, CreateWaitableTimerExW, INFINITE, SetWaitableTimer,
    TIMER_ALL_ACCESS, WaitForSingleObject,
};
use windows::core::PCWSTR;

/// A thread-owned high-resolution waitable timer.
///
/// The handle is created by the thread that uses it and closed when this value
/// is dropped, which for the thread context means at thread exit.
pub struct WaitableTimer {
    handle: HANDLE,
}

impl WaitableTimer {
    pub fn new() -> SleepResult<Self> {
        let handle = unsafe {
            CreateWaitableTimerExW(
                None,
                PCWSTR::null(),
                CREATE_WAITABLE_TIMER_HIGH_RESOLUTION,
                TIMER_ALL_ACCESS.0,
            )
        }
        .map_err(|e| SleepError::TimerCreate(e.message().to_string()))?;

        tracing::debug!("created high-resolution waitable timer");
        Ok(Self { handle })
    }

    pub fn try_sleep(&self, duration: Duration) -> SleepResult<()> {
        let due_time = relative_due_time(duration);

        unsafe { SetWaitableTimer(self.handle, &due_time, 0, None, None, false) }
            .map_err(|e| SleepError::TimerArm(e.message().to_string()))?;

        let wait = unsafe { WaitForSingleObject(self.handle, INFINITE) };
        if wait != WAIT_OBJECT_0 {
            return Err(SleepError::TimerWait(format!(
                "unexpected wait result {:#x}",
                wait.0
            )));
        }

        Ok(())
    }
}

/// Converts to the negative 100 ns tick count that arms a timer relative to now.
fn relative_due_time(duration: Duration) -> i64 {
    let ticks = i64::try_from(duration.as_nanos() / 100).unwrap_or(i64::MAX);
    // A zero due time is absolute, not relative; arm for one tick instead.
    -ticks.max(1)
}

impl CoarseSleep for WaitableTimer {
    fn coarse_sleep(&mut self, duration: Duration) {
        if let Err(e) = self.try_sleep(duration) {
            fatal(e);
        }
    }
}

#[cold]
fn fatal(err: SleepError) -> ! {
    panic!("high-resolution waitable timer failed after capability check: {err}");
}

impl Drop for WaitableTimer {
    fn drop(&mut self) {
        match unsafe { CloseHandle(self.handle) } {
            Ok(()) => tracing::debug!("released waitable timer"),
            Err(e) => tracing::warn!(error = %e, "failed to close waitable timer handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Version;
    use crate::platform::is_windows_version_or_later;
    use std::time::Instant;

    #[test]
    fn test_due_time_is_relative_ticks() {
        assert_eq!(relative_due_time(Duration::from_millis(2)), -20_000);
        assert_eq!(relative_due_time(Duration::from_nanos(250)), -2);
        assert_eq!(relative_due_time(Duration::ZERO), -1);
    }

    #[test]
    fn test_timer_sleeps_at_least_requested() {
        if !is_windows_version_or_later(Version::WINDOWS_10_RS4) {
            return;
        }

        let timer = WaitableTimer::new().unwrap();
        let start = Instant::now();
        timer.try_sleep(Duration::from_millis(2)).unwrap();
        assert!(start.elapsed() >= Duration::from_micros(1_900));
    }
}
