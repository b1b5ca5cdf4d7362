use crate::core::{SleepError, SleepResult};
use crate::sleep::primitive::CoarseSleep;
use std::time::Duration;

/// Monotonic interval sleep that resumes after signal interruptions until the
/// whole interval has been slept.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalSleep;

impl IntervalSleep {
    pub fn try_sleep(&self, duration: Duration) -> SleepResult<()> {
        let mut request = to_timespec(duration);
        let mut remain = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };

        loop {
            match sleep_once(&request, &mut remain) {
                Ok(()) => return Ok(()),
                Err(libc::EINTR) => request = remain,
                Err(code) => {
                    return Err(SleepError::ClockError(format!(
                        "interval sleep of {:?} failed: {}",
                        duration,
                        std::io::Error::from_raw_os_error(code)
                    )));
                }
            }
        }
    }
}

impl CoarseSleep for IntervalSleep {
    fn coarse_sleep(&mut self, duration: Duration) {
        if let Err(e) = self.try_sleep(duration) {
            fatal(e);
        }
    }
}

#[cold]
fn fatal(err: SleepError) -> ! {
    panic!("monotonic interval sleep unavailable: {err}");
}

fn to_timespec(duration: Duration) -> libc::timespec {
    libc::timespec {
        tv_sec: libc::time_t::try_from(duration.as_secs()).unwrap_or(libc::time_t::MAX),
        tv_nsec: duration.subsec_nanos() as libc::c_long,
    }
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
fn sleep_once(request: &libc::timespec, remain: &mut libc::timespec) -> Result<(), i32> {
    // clock_nanosleep reports failures through its return value, not errno.
    let rv = unsafe { libc::clock_nanosleep(libc::CLOCK_MONOTONIC, 0, request, remain) };
    if rv == 0 { Ok(()) } else { Err(rv) }
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
fn sleep_once(request: &libc::timespec, remain: &mut libc::timespec) -> Result<(), i32> {
    let rv = unsafe { libc::nanosleep(request, remain) };
    if rv == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(libc::EINVAL))
    }
}
