//! Strategy selection and the custom-strategy operation set
//!
//! A buffer is bound to exactly one strategy at construction time. The
//! three built-ins cover the usual embedded topologies:
//!
//! - [`StrategyKind::Uncoordinated`] — ISR → main loop, one producer and
//!   one consumer, no guard at all
//! - [`StrategyKind::CriticalSection`] — bare-metal sharing across
//!   multiple interrupt sources, guarded by masking interrupt delivery
//! - [`StrategyKind::MutualExclusion`] — RTOS threads, guarded by a
//!   blocking lock; never callable from interrupt context
//!
//! Anything else plugs in through [`StrategyOps`] and the registry
//! (tags at or above [`StrategyKind::CUSTOM_BASE`]).

use core::fmt;

use super::state::RingState;

/// Concurrency strategy selected at buffer construction
///
/// # Quick Selection Guide
/// - **Single producer, single consumer**: `Uncoordinated` (fastest; the
///   index hand-off alone is the synchronization)
/// - **Shared with interrupt handlers**: `CriticalSection` (interrupts
///   stay masked for whole bulk transfers — budget the latency)
/// - **RTOS threads, possible blocking**: `MutualExclusion`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrategyKind {
    /// No guard; correctness relies on the single-producer /
    /// single-consumer discipline (the producer context touches only the
    /// write index, the consumer context only the read index). More than
    /// one of either is a caller contract violation, not a detected
    /// error.
    Uncoordinated,

    /// Every operation runs with interrupt delivery disabled, prior state
    /// restored afterwards. Safe from any context; long bulk transfers
    /// hold interrupts off for the whole copy.
    CriticalSection,

    /// Every operation runs under a blocking lock owned by the buffer.
    /// Fully serializes any number of producers and consumers; the
    /// acquire may suspend the calling task, so never use it from
    /// interrupt context.
    MutualExclusion,

    /// A strategy registered at runtime under this tag
    /// (must be >= [`StrategyKind::CUSTOM_BASE`]).
    Custom(u8),
}

impl StrategyKind {
    /// First tag value available to registered custom strategies; the
    /// values below it identify the built-ins.
    pub const CUSTOM_BASE: u8 = 3;

    /// Numeric tag for this strategy
    pub const fn tag(self) -> u8 {
        match self {
            StrategyKind::Uncoordinated => 0,
            StrategyKind::CriticalSection => 1,
            StrategyKind::MutualExclusion => 2,
            StrategyKind::Custom(tag) => tag,
        }
    }

    /// Maps a numeric tag back to a strategy
    ///
    /// Tags at or above [`CUSTOM_BASE`] become [`Custom`] regardless of
    /// whether anything is registered under them; resolution against the
    /// registry happens at construction.
    ///
    /// [`CUSTOM_BASE`]: StrategyKind::CUSTOM_BASE
    /// [`Custom`]: StrategyKind::Custom
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            0 => StrategyKind::Uncoordinated,
            1 => StrategyKind::CriticalSection,
            2 => StrategyKind::MutualExclusion,
            tag => StrategyKind::Custom(tag),
        }
    }

    /// Returns a human-readable name for this strategy
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Uncoordinated => "uncoordinated",
            StrategyKind::CriticalSection => "critical_section",
            StrategyKind::MutualExclusion => "mutual_exclusion",
            StrategyKind::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Custom(tag) => write!(f, "custom(tag={})", tag),
            other => f.write_str(other.name()),
        }
    }
}

/// The nine-operation set a custom strategy implements
///
/// Registered descriptors receive the buffer's [`RingState`] and are
/// responsible for their own guarding; the dispatch layer adds nothing
/// around these calls. Implementations must preserve the core semantics —
/// same return values, same best-effort partial transfers, no blocking
/// beyond whatever guard the strategy itself takes — so that swapping
/// strategies never changes outcomes, only call safety.
///
/// Descriptors are process-wide and immutable: registration takes a
/// `&'static` reference and there is no unregister.
///
/// # Example
///
/// ```rust,ignore
/// use ringpipe_core::{RingState, StrategyOps};
///
/// struct SchedulerPausedOps;
///
/// impl StrategyOps for SchedulerPausedOps {
///     fn write_byte(&self, state: &RingState<'_>, byte: u8) -> bool {
///         scheduler::paused(|| state.write_byte(byte))
///     }
///     // ... remaining operations delegate the same way
/// }
///
/// static SCHEDULER_PAUSED: SchedulerPausedOps = SchedulerPausedOps;
/// ringpipe_core::register_custom(StrategyKind::CUSTOM_BASE, &SCHEDULER_PAUSED)?;
/// ```
pub trait StrategyOps: Send + Sync {
    /// Stores one byte; `false` when full.
    fn write_byte(&self, state: &RingState<'_>, byte: u8) -> bool;
    /// Fetches one byte; `None` when empty.
    fn read_byte(&self, state: &RingState<'_>) -> Option<u8>;
    /// Bulk write; returns bytes accepted.
    fn write_slice(&self, state: &RingState<'_>, src: &[u8]) -> usize;
    /// Bulk read; returns bytes retrieved.
    fn read_slice(&self, state: &RingState<'_>, dst: &mut [u8]) -> usize;
    /// Number of unread bytes held.
    fn occupancy(&self, state: &RingState<'_>) -> usize;
    /// Number of bytes writable before full.
    fn free_space(&self, state: &RingState<'_>) -> usize;
    /// True when nothing is buffered.
    fn is_empty(&self, state: &RingState<'_>) -> bool;
    /// True when a single-byte write would fail.
    fn is_full(&self, state: &RingState<'_>) -> bool;
    /// Drops buffered data (indices only; storage is not wiped).
    fn clear(&self, state: &RingState<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in [
            StrategyKind::Uncoordinated,
            StrategyKind::CriticalSection,
            StrategyKind::MutualExclusion,
            StrategyKind::Custom(3),
            StrategyKind::Custom(200),
        ] {
            assert_eq!(StrategyKind::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn builtin_tags_below_custom_base() {
        assert!(StrategyKind::Uncoordinated.tag() < StrategyKind::CUSTOM_BASE);
        assert!(StrategyKind::CriticalSection.tag() < StrategyKind::CUSTOM_BASE);
        assert!(StrategyKind::MutualExclusion.tag() < StrategyKind::CUSTOM_BASE);
        assert_eq!(
            StrategyKind::from_tag(StrategyKind::CUSTOM_BASE),
            StrategyKind::Custom(3)
        );
    }

    #[test]
    fn strategy_names() {
        assert_eq!(StrategyKind::Uncoordinated.name(), "uncoordinated");
        assert_eq!(StrategyKind::CriticalSection.name(), "critical_section");
        assert_eq!(StrategyKind::MutualExclusion.name(), "mutual_exclusion");
        assert_eq!(StrategyKind::Custom(9).name(), "custom");
    }

    #[cfg(feature = "std")]
    #[test]
    fn strategy_display() {
        assert_eq!(format!("{}", StrategyKind::Uncoordinated), "uncoordinated");
        assert_eq!(format!("{}", StrategyKind::Custom(7)), "custom(tag=7)");
    }
}
