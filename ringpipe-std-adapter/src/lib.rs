//! Std Adapter for Ringpipe
//!
//! This crate provides the hosted-platform implementation of the
//! capability traits in `ringpipe-core`, making every buffer strategy
//! usable from plain threads:
//!
//! - **Blocking lock**: `std::sync::Mutex`, so the mutual-exclusion
//!   strategy serializes any number of producer/consumer threads
//! - **Interrupt masking**: the `critical-section` crate's std
//!   implementation — a process-global critical section, which preserves
//!   the exclusivity contract of the critical-section strategy on targets
//!   that have no interrupts to mask
//!
//! The adapter exists for tests, tools, and host-side simulation of
//! embedded data paths; on real bare-metal targets, bind the same core
//! against the target's `critical-section` implementation instead.
//!
//! # Example
//!
//! ```rust
//! use ringpipe_core::{RingError, StrategyKind};
//! use ringpipe_std_adapter::StdRingBuffer;
//!
//! let mut storage = [0u8; 16];
//! let rb = StdRingBuffer::create(&mut storage, StrategyKind::MutualExclusion).unwrap();
//!
//! assert_eq!(rb.write_slice(b"hello"), 5);
//! assert_eq!(rb.occupancy(), 5);
//!
//! let mut out = [0u8; 5];
//! assert_eq!(rb.read_slice(&mut out), 5);
//! assert_eq!(&out, b"hello");
//! assert!(matches!(rb.read(), Err(RingError::Empty)));
//! ```

mod platform;

pub use platform::{StdLock, StdPlatform};

/// Ring buffer bound to the hosted platform.
pub type StdRingBuffer<'a> = ringpipe_core::RingBuffer<'a, StdPlatform>;
