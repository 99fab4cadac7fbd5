//! The bound buffer: shared state plus a concurrency strategy
//!
//! [`RingBuffer`] is what callers hold. Construction picks a strategy,
//! resolves it against the built-ins or the registry, and (for mutual
//! exclusion) creates the lock the buffer will own. After that, every one
//! of the nine operations dispatches through the selected engine: the
//! guard brackets the ENTIRE delegated call, bulk copies included, and
//! never changes what the operation returns — strategies add exclusivity,
//! nothing else.
//!
//! # Example
//!
//! ```rust,ignore
//! use ringpipe_core::{BareMetalPlatform, RingBuffer, StrategyKind};
//!
//! static mut UART_RX_STORAGE: [u8; 256] = [0; 256];
//!
//! // ISR → main loop: uncoordinated SPSC, no guard needed.
//! let rb = RingBuffer::<BareMetalPlatform>::create(
//!     unsafe { &mut UART_RX_STORAGE },
//!     StrategyKind::Uncoordinated,
//! )?;
//!
//! rb.write(0x42)?;
//! assert_eq!(rb.read()?, 0x42);
//! ```

use crate::error::{RingError, RingResult};
use crate::platform::{BlockingLock, InterruptControl, Platform};

use super::registry;
use super::state::RingState;
use super::strategy::{StrategyKind, StrategyOps};
#[cfg(feature = "param-check")]
use super::MIN_CAPACITY;

#[cfg(feature = "statistics")]
use super::state::TransferStats;

/// The per-buffer resolved strategy binding.
enum Engine<P: Platform> {
    Uncoordinated,
    CriticalSection,
    MutualExclusion(P::Lock),
    Custom {
        tag: u8,
        ops: &'static dyn StrategyOps,
    },
}

/// Fixed-capacity circular byte buffer bound to a concurrency strategy
///
/// Storage is borrowed from the caller and never freed here; capacity is
/// the storage length, of which one slot stays unused (usable capacity is
/// `capacity() - 1`). Dropping the buffer releases the lock resource (if
/// the strategy owns one) and ends the storage borrow;
/// [`into_storage`](RingBuffer::into_storage) does the same while handing
/// the slice back explicitly.
pub struct RingBuffer<'a, P: Platform> {
    state: RingState<'a>,
    engine: Engine<P>,
}

impl<'a, P: Platform> RingBuffer<'a, P> {
    /// Creates a buffer over `storage` bound to `kind` (factory).
    ///
    /// Validates `storage.len() >= MIN_CAPACITY` (compiled out without the
    /// `param-check` feature), resets both indices, then resolves the
    /// strategy:
    ///
    /// - built-in tags bind directly; `MutualExclusion` additionally
    ///   creates the platform lock and fails the whole construction with
    ///   [`RingError::ResourceExhausted`] if that fails
    /// - `Custom(tag)` is looked up in the registry; an unregistered tag
    ///   or one below [`StrategyKind::CUSTOM_BASE`] fails with
    ///   [`RingError::UnsupportedStrategy`]
    ///
    /// On any failure no partial binding is left behind — the caller gets
    /// an `Err` and the storage borrow back.
    pub fn create(storage: &'a mut [u8], kind: StrategyKind) -> RingResult<Self> {
        #[cfg(feature = "param-check")]
        {
            if storage.len() < MIN_CAPACITY {
                return Err(RingError::invalid_argument(
                    "storage shorter than MIN_CAPACITY",
                ));
            }
        }

        let engine = match kind {
            StrategyKind::Uncoordinated => Engine::Uncoordinated,
            StrategyKind::CriticalSection => Engine::CriticalSection,
            StrategyKind::MutualExclusion => Engine::MutualExclusion(P::Lock::try_create()?),
            StrategyKind::Custom(tag) => {
                if tag < StrategyKind::CUSTOM_BASE {
                    return Err(RingError::UnsupportedStrategy { tag });
                }
                match registry::lookup(tag) {
                    Some(ops) => Engine::Custom { tag, ops },
                    None => return Err(RingError::UnsupportedStrategy { tag }),
                }
            }
        };

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "ring buffer created: capacity={} strategy={}",
            storage.len(),
            kind.tag()
        );

        Ok(Self {
            state: RingState::new(storage),
            engine,
        })
    }

    /// Runs a core operation under the built-in guard. Custom engines
    /// never reach this; their descriptor carries its own guarding.
    #[inline]
    fn guarded<R>(&self, op: impl FnOnce(&RingState<'a>) -> R) -> R {
        match &self.engine {
            Engine::Uncoordinated => op(&self.state),
            Engine::CriticalSection => P::Irq::with_disabled(|| op(&self.state)),
            Engine::MutualExclusion(lock) => lock.with_acquired(|| op(&self.state)),
            Engine::Custom { .. } => unreachable!("custom engines dispatch directly"),
        }
    }

    /// Writes one byte.
    ///
    /// [`RingError::Full`] is a routine outcome, not a fault: nothing was
    /// mutated and the caller decides whether to retry, drop, or back off.
    pub fn write(&self, byte: u8) -> RingResult<()> {
        let accepted = match &self.engine {
            Engine::Custom { ops, .. } => ops.write_byte(&self.state, byte),
            _ => self.guarded(|state| state.write_byte(byte)),
        };
        if accepted {
            Ok(())
        } else {
            Err(RingError::Full)
        }
    }

    /// Reads one byte; [`RingError::Empty`] when nothing is buffered.
    pub fn read(&self) -> RingResult<u8> {
        let byte = match &self.engine {
            Engine::Custom { ops, .. } => ops.read_byte(&self.state),
            _ => self.guarded(|state| state.read_byte()),
        };
        byte.ok_or(RingError::Empty)
    }

    /// Writes as much of `src` as fits; returns the accepted count.
    ///
    /// Best effort and non-blocking: a short count (including 0) means the
    /// buffer had less free space than requested, never that something
    /// failed. Under the critical-section strategy the whole copy runs
    /// with interrupts masked — budget bulk sizes accordingly.
    pub fn write_slice(&self, src: &[u8]) -> usize {
        match &self.engine {
            Engine::Custom { ops, .. } => ops.write_slice(&self.state, src),
            _ => self.guarded(|state| state.write_slice(src)),
        }
    }

    /// Reads up to `dst.len()` bytes into `dst`; returns the count read.
    pub fn read_slice(&self, dst: &mut [u8]) -> usize {
        match &self.engine {
            Engine::Custom { ops, .. } => ops.read_slice(&self.state, dst),
            _ => self.guarded(|state| state.read_slice(dst)),
        }
    }

    /// Number of unread bytes currently buffered.
    pub fn occupancy(&self) -> usize {
        match &self.engine {
            Engine::Custom { ops, .. } => ops.occupancy(&self.state),
            _ => self.guarded(|state| state.occupancy()),
        }
    }

    /// Number of bytes that can be written before the buffer is full.
    pub fn free_space(&self) -> usize {
        match &self.engine {
            Engine::Custom { ops, .. } => ops.free_space(&self.state),
            _ => self.guarded(|state| state.free_space()),
        }
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        match &self.engine {
            Engine::Custom { ops, .. } => ops.is_empty(&self.state),
            _ => self.guarded(|state| state.is_empty()),
        }
    }

    /// True when a single-byte write would fail.
    pub fn is_full(&self) -> bool {
        match &self.engine {
            Engine::Custom { ops, .. } => ops.is_full(&self.state),
            _ => self.guarded(|state| state.is_full()),
        }
    }

    /// Drops all buffered data.
    ///
    /// Only the indices reset; storage keeps the stale bytes (see
    /// [`RingState::clear`] for the data-retention caveat).
    pub fn clear(&self) {
        match &self.engine {
            Engine::Custom { ops, .. } => ops.clear(&self.state),
            _ => self.guarded(|state| state.clear()),
        }
    }

    /// Total slot count (usable capacity is one less).
    pub fn capacity(&self) -> usize {
        self.state.capacity()
    }

    /// The strategy this buffer was bound to.
    pub fn strategy_kind(&self) -> StrategyKind {
        match &self.engine {
            Engine::Uncoordinated => StrategyKind::Uncoordinated,
            Engine::CriticalSection => StrategyKind::CriticalSection,
            Engine::MutualExclusion(_) => StrategyKind::MutualExclusion,
            Engine::Custom { tag, .. } => StrategyKind::Custom(*tag),
        }
    }

    /// Snapshot of the transfer counters (unguarded read; approximate
    /// while traffic is in flight).
    #[cfg(feature = "statistics")]
    pub fn stats(&self) -> TransferStats {
        self.state.stats()
    }

    /// Consumes the buffer, releasing any lock resource, and returns the
    /// caller's storage borrow.
    pub fn into_storage(self) -> &'a mut [u8] {
        let Self { state, engine } = self;
        drop(engine);
        state.into_storage()
    }
}
