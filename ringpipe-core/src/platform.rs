//! Platform capability traits
//!
//! The buffer core never talks to hardware or an RTOS directly. The two
//! primitives it needs — interrupt masking and a blocking lock — are
//! consumed through the narrow traits defined here and supplied by a
//! platform binding (e.g. `ringpipe-std-adapter` for hosted targets, or a
//! few lines of glue over the target HAL on bare metal).
//!
//! # Design Philosophy
//!
//! - **Platform Agnostic**: the core depends on abstractions, never on a
//!   concrete OS or architecture crate
//! - **Bracket Guards**: both primitives are exposed as scoped brackets
//!   (`with_disabled`, `with_acquired`) so a guard can never leak past the
//!   operation it protects
//! - **Zero-Cost**: the platform is a compile-time type parameter; built-in
//!   strategy dispatch is a plain enum match, no vtable on the hot path

use crate::error::{RingError, RingResult};

/// Interrupt-masking capability
///
/// `with_disabled` must save the current interrupt-delivery state, disable
/// delivery, run `f`, then restore the saved state — nesting-safe, so a
/// call from an already-masked context leaves interrupts masked on return.
///
/// Implementations are associated functions rather than methods: interrupt
/// masking is ambient per-core state, there is no instance to hold.
pub trait InterruptControl {
    /// Runs `f` with interrupt delivery disabled, restoring the prior
    /// state afterwards.
    fn with_disabled<R>(f: impl FnOnce() -> R) -> R;
}

/// [`InterruptControl`] over the `critical-section` crate
///
/// This is the default interrupt guard for every target the
/// `critical-section` ecosystem covers: on bare metal the linked
/// implementation masks interrupts (whatever the architecture's
/// save/disable/restore sequence is), on hosted targets the `std`
/// implementation degrades to a process-global lock, which preserves the
/// exclusivity contract even though there are no interrupts to mask.
#[derive(Debug, Clone, Copy)]
pub struct CriticalSectionIrq;

impl InterruptControl for CriticalSectionIrq {
    fn with_disabled<R>(f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}

/// Blocking mutual-exclusion capability
///
/// The acquire step may suspend the calling task indefinitely; never use a
/// mutual-exclusion buffer from interrupt context. A bounded-wait acquire
/// is a permitted implementation extension, not part of this contract.
///
/// The lock resource is released by `Drop`.
pub trait BlockingLock: Sized + Send + Sync {
    /// Creates the lock resource.
    ///
    /// Fails with [`RingError::ResourceExhausted`] when the platform
    /// cannot allocate another lock, which fails the whole buffer
    /// construction.
    fn try_create() -> RingResult<Self>;

    /// Runs `f` while holding the lock.
    ///
    /// Calls must not nest on the same lock; implementations are not
    /// required to be recursion-safe.
    fn with_acquired<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// [`BlockingLock`] stand-in for platforms with no blocking primitive
///
/// `try_create` always fails, so selecting the mutual-exclusion strategy
/// on such a platform fails construction with
/// [`RingError::UnsupportedStrategy`] — the same surface a disabled
/// strategy presents. The type is uninhabited; `with_acquired` can never
/// be reached.
#[derive(Debug)]
pub enum UnsupportedLock {}

impl BlockingLock for UnsupportedLock {
    fn try_create() -> RingResult<Self> {
        Err(RingError::UnsupportedStrategy {
            tag: crate::ring::StrategyKind::MutualExclusion.tag(),
        })
    }

    fn with_acquired<R>(&self, _f: impl FnOnce() -> R) -> R {
        match *self {}
    }
}

/// Compile-time bundle of the capabilities a buffer is bound to
///
/// Implemented by adapter crates; never instantiated, only named as a type
/// parameter.
pub trait Platform: 'static {
    /// Interrupt guard used by the critical-section strategy
    type Irq: InterruptControl;
    /// Lock used by the mutual-exclusion strategy
    type Lock: BlockingLock;

    /// Returns the platform name for debugging and logging
    fn platform_name() -> &'static str;
}

/// Bare-metal platform: `critical-section` interrupt masking, no blocking
/// lock
///
/// The right binding for ISR ↔ main-loop hand-off on targets without an
/// RTOS. Selecting [`StrategyKind::MutualExclusion`] under this platform
/// fails construction.
///
/// [`StrategyKind::MutualExclusion`]: crate::ring::StrategyKind::MutualExclusion
#[derive(Debug, Clone, Copy)]
pub struct BareMetalPlatform;

impl Platform for BareMetalPlatform {
    type Irq = CriticalSectionIrq;
    type Lock = UnsupportedLock;

    fn platform_name() -> &'static str {
        "bare-metal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_section_bracket_returns_value() {
        let value = CriticalSectionIrq::with_disabled(|| 41 + 1);
        assert_eq!(value, 42);
    }

    #[test]
    fn unsupported_lock_fails_creation() {
        let result = UnsupportedLock::try_create();
        assert!(matches!(
            result,
            Err(RingError::UnsupportedStrategy { tag: 2 })
        ));
    }

    #[test]
    fn platform_names() {
        assert_eq!(BareMetalPlatform::platform_name(), "bare-metal");
    }
}
