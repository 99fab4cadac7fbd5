//! Hosted implementations of the ringpipe capability traits

use std::sync::{Mutex, PoisonError};

use ringpipe_core::platform::{BlockingLock, CriticalSectionIrq, Platform};
use ringpipe_core::RingResult;

#[cfg(feature = "tracing")]
use tracing::debug;

/// [`BlockingLock`] over `std::sync::Mutex`
///
/// A poisoned mutex is recovered, not propagated: buffer operations must
/// not panic no matter what another thread did while holding the guard,
/// and the ring indices stay self-consistent across a poisoned hand-off.
pub struct StdLock {
    inner: Mutex<()>,
}

impl BlockingLock for StdLock {
    fn try_create() -> RingResult<Self> {
        #[cfg(feature = "tracing")]
        debug!("creating std blocking lock");
        Ok(Self {
            inner: Mutex::new(()),
        })
    }

    fn with_acquired<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}

/// Hosted platform: std mutex plus the `critical-section` std
/// implementation
#[derive(Debug, Clone, Copy)]
pub struct StdPlatform;

impl Platform for StdPlatform {
    type Irq = CriticalSectionIrq;
    type Lock = StdLock;

    fn platform_name() -> &'static str {
        "std"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_bracket_returns_value() {
        let lock = StdLock::try_create().unwrap();
        assert_eq!(lock.with_acquired(|| 40 + 2), 42);
    }

    #[test]
    fn poisoned_lock_recovers() {
        let lock = StdLock::try_create().unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            lock.with_acquired(|| panic!("guard holder dies"))
        }));
        assert!(result.is_err());

        // The next acquisition must still go through.
        assert_eq!(lock.with_acquired(|| 7), 7);
    }

    #[test]
    fn platform_name() {
        assert_eq!(StdPlatform::platform_name(), "std");
    }
}
