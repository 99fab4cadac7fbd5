//! Ringpipe Core
//!
//! Fixed-capacity circular byte buffer for producer/consumer hand-off in
//! resource-constrained environments: interrupt service routines,
//! cooperative tasks, RTOS threads. Storage is caller-supplied, the crate
//! never allocates, and every operation is bounded.
//!
//! The concurrency policy is pluggable: one algorithmic core, three
//! built-in guards (uncoordinated SPSC, critical-section, blocking mutual
//! exclusion) selected at construction, plus a bounded registry for custom
//! strategies. Platform primitives (interrupt masking, a blocking lock)
//! are consumed through the narrow traits in [`platform`] and supplied by
//! an adapter crate such as `ringpipe-std-adapter`.

#![cfg_attr(not(feature = "std"), no_std)]

mod error;
pub mod platform;
pub mod ring;

// Public API exports
pub use error::{RingError, RingResult};
pub use platform::{
    BareMetalPlatform, BlockingLock, CriticalSectionIrq, InterruptControl, Platform,
    UnsupportedLock,
};
pub use ring::{
    register_custom, RingBuffer, RingState, StrategyKind, StrategyOps, MAX_CUSTOM_STRATEGIES,
    MIN_CAPACITY,
};

#[cfg(feature = "statistics")]
pub use ring::TransferStats;
