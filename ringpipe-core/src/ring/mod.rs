//! Circular buffer core: shared state, strategies, factory, registry
//!
//! Two layers, bottom-up:
//!
//! - [`RingState`] — the leaf algorithm: pure wraparound index arithmetic
//!   over caller-supplied storage. Owns no memory, never allocates, never
//!   blocks.
//! - [`RingBuffer`] — the bound entity: the same nine operations
//!   dispatched through the strategy selected at construction, each call
//!   bracketed by that strategy's guard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                RingBuffer<'a, P>                    │
//! │   write / read / write_slice / read_slice /         │
//! │   occupancy / free_space / is_empty / is_full /     │
//! │   clear                                             │
//! └────────────────────────┬────────────────────────────┘
//!                          │ guard bracket
//!     ┌──────────────┬─────┴────────┬──────────────────┐
//!     │              │              │                  │
//!     ▼              ▼              ▼                  ▼
//! uncoordinated  critical       mutual          registered
//! (no guard)     section        exclusion       StrategyOps
//!                (P::Irq)       (P::Lock)       (own guard)
//!     │              │              │                  │
//!     └──────────────┴──────┬───────┴──────────────────┘
//!                           ▼
//!                   RingState<'a> (index arithmetic)
//! ```
//!
//! The guard never alters an operation's outcome: for any fixed
//! single-producer/single-consumer call sequence, all strategies produce
//! identical results step for step. Choosing one is purely a question of
//! which contexts may touch the buffer concurrently.

mod buffer;
mod registry;
mod state;
mod strategy;

pub use buffer::RingBuffer;
pub use registry::{register_custom, MAX_CUSTOM_STRATEGIES};
pub use state::RingState;
pub use strategy::{StrategyKind, StrategyOps};

#[cfg(feature = "statistics")]
pub use state::TransferStats;

/// Smallest allowed storage length. One slot is always kept unused, so
/// this is the smallest capacity with any usable space at all.
pub const MIN_CAPACITY: usize = 2;
