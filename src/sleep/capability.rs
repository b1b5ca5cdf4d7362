use crate::core::{CoarseStrategy, Version};
use crate::platform::{is_windows_version_or_later, os_version};
use std::sync::OnceLock;

/// Environment variable that pins the coarse strategy, e.g. `standard`.
pub const STRATEGY_ENV: &str = "HRSLEEP_STRATEGY";

static CAPABILITY: OnceLock<Capability> = OnceLock::new();

/// The process-wide coarse-sleep decision. Computed once, read-only after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    strategy: CoarseStrategy,
    os_version: Option<Version>,
}

impl Capability {
    /// The decision for this process, probing the platform on first use.
    pub fn get() -> &'static Capability {
        CAPABILITY.get_or_init(|| {
            let capability = Self::detect();
            tracing::debug!(
                strategy = %capability.strategy,
                os_version = ?capability.os_version,
                "selected coarse sleep strategy"
            );
            capability
        })
    }

    pub fn detect() -> Self {
        let requested = std::env::var(STRATEGY_ENV).ok();
        Self::detect_with(requested.as_deref(), waitable_timer_supported())
    }

    fn detect_with(requested: Option<&str>, high_res_timer: bool) -> Self {
        let best = best_available(high_res_timer);

        let strategy = match requested.map(str::parse::<CoarseStrategy>) {
            None => best,
            Some(Ok(strategy)) if is_usable(strategy, high_res_timer) => strategy,
            Some(Ok(strategy)) => {
                tracing::warn!(
                    requested = %strategy,
                    fallback = %best,
                    "requested coarse strategy is unavailable on this platform"
                );
                best
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, fallback = %best, "ignoring {}", STRATEGY_ENV);
                best
            }
        };

        Self {
            strategy,
            os_version: os_version(),
        }
    }

    pub fn strategy(&self) -> CoarseStrategy {
        self.strategy
    }

    pub fn os_version(&self) -> Option<Version> {
        self.os_version
    }
}

fn waitable_timer_supported() -> bool {
    is_windows_version_or_later(Version::WINDOWS_10_RS4)
}

fn is_usable(strategy: CoarseStrategy, high_res_timer: bool) -> bool {
    match strategy {
        CoarseStrategy::WaitableTimer => strategy.is_compiled_in() && high_res_timer,
        other => other.is_compiled_in(),
    }
}

fn best_available(high_res_timer: bool) -> CoarseStrategy {
    CoarseStrategy::all()
        .iter()
        .copied()
        .find(|&s| is_usable(s, high_res_timer))
        .unwrap_or(CoarseStrategy::Standard)
}
