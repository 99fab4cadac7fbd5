//! Shared index state and the core wraparound algorithm
//!
//! [`RingState`] is the unguarded half of every buffer: two atomic indices
//! over a caller-supplied byte region, plus the index arithmetic that the
//! strategy layer wraps. It owns no memory and never allocates; the
//! storage slice is borrowed for the buffer's lifetime and handed back by
//! [`RingState::into_storage`].
//!
//! One slot is always kept unused so two indices can distinguish "empty"
//! from "full": usable capacity is `capacity - 1`, `write == read` means
//! empty, `(write + 1) % capacity == read` means full.
//!
//! # Memory ordering
//!
//! The index fields are the hand-off signal between producer and consumer
//! contexts. Each side publishes its own index with `Release` after
//! touching storage and observes the opposite index with `Acquire` before
//! trusting it, so a completed write is visible wherever its index advance
//! is. That is the entire synchronization story of the uncoordinated
//! strategy; the other strategies add exclusivity on top, never replace
//! this.

use core::marker::PhantomData;
use core::ptr;
use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "statistics")]
use core::sync::atomic::AtomicU32;

use super::MIN_CAPACITY;

/// Transfer counters, present with the `statistics` feature
///
/// Counters are updated inside the guarded operations and read without a
/// guard by [`RingState::stats`], so a snapshot taken during concurrent
/// traffic is approximate.
#[cfg(feature = "statistics")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferStats {
    /// Bytes accepted by write operations
    pub writes: u32,
    /// Bytes handed out by read operations
    pub reads: u32,
    /// Write attempts that found no space (full single-byte writes and
    /// truncated or rejected bulk writes)
    pub overflows: u32,
}

/// Shared ring state: borrowed storage plus the two indices
///
/// All operations take `&self`; interior mutability through the atomics
/// and raw storage writes is what lets one state be driven from an ISR and
/// a task at once. The safety contract for that sharing is the strategy
/// layer's business — on its own, `RingState` only guarantees the SPSC
/// discipline documented on each method.
#[derive(Debug)]
pub struct RingState<'a> {
    storage: *mut u8,
    capacity: usize,
    write_index: AtomicUsize,
    read_index: AtomicUsize,
    #[cfg(feature = "statistics")]
    write_count: AtomicU32,
    #[cfg(feature = "statistics")]
    read_count: AtomicU32,
    #[cfg(feature = "statistics")]
    overflow_count: AtomicU32,
    _storage: PhantomData<&'a mut [u8]>,
}

// The raw storage pointer came from an exclusive borrow held for 'a, and
// every storage access stays inside [0, capacity). Cross-context sharing
// is sound under the per-strategy contracts: SPSC discipline for the
// uncoordinated variant, full exclusivity for the guarded ones.
unsafe impl Send for RingState<'_> {}
unsafe impl Sync for RingState<'_> {}

impl<'a> RingState<'a> {
    /// Wraps the caller's storage; indices start at zero.
    pub fn new(storage: &'a mut [u8]) -> Self {
        Self {
            storage: storage.as_mut_ptr(),
            capacity: storage.len(),
            write_index: AtomicUsize::new(0),
            read_index: AtomicUsize::new(0),
            #[cfg(feature = "statistics")]
            write_count: AtomicU32::new(0),
            #[cfg(feature = "statistics")]
            read_count: AtomicU32::new(0),
            #[cfg(feature = "statistics")]
            overflow_count: AtomicU32::new(0),
            _storage: PhantomData,
        }
    }

    /// Total slot count (usable capacity is one less).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// A state whose capacity cannot hold the spare slot is degenerate:
    /// only constructible with validation disabled. Every operation treats
    /// it as permanently empty and never full rather than dividing by zero
    /// or touching storage.
    #[inline]
    fn is_degenerate(&self) -> bool {
        self.capacity < MIN_CAPACITY
    }

    #[inline]
    fn occupancy_of(&self, write: usize, read: usize) -> usize {
        if write >= read {
            write - read
        } else {
            self.capacity - read + write
        }
    }

    /// Number of unread bytes currently held.
    pub fn occupancy(&self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        let write = self.write_index.load(Ordering::Acquire);
        let read = self.read_index.load(Ordering::Acquire);
        self.occupancy_of(write, read)
    }

    /// Number of bytes that can still be written before the buffer is full.
    pub fn free_space(&self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        self.capacity - 1 - self.occupancy()
    }

    /// Stores one byte; `false` (without mutation) when full.
    pub fn write_byte(&self, byte: u8) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let write = self.write_index.load(Ordering::Relaxed);
        let next = (write + 1) % self.capacity;
        if next == self.read_index.load(Ordering::Acquire) {
            #[cfg(feature = "statistics")]
            self.overflow_count.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        unsafe { self.storage.add(write).write(byte) };
        self.write_index.store(next, Ordering::Release);
        #[cfg(feature = "statistics")]
        self.write_count.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Fetches one byte; `None` when empty.
    pub fn read_byte(&self) -> Option<u8> {
        if self.is_degenerate() {
            return None;
        }
        let read = self.read_index.load(Ordering::Relaxed);
        if read == self.write_index.load(Ordering::Acquire) {
            return None;
        }
        let byte = unsafe { self.storage.add(read).read() };
        self.read_index.store((read + 1) % self.capacity, Ordering::Release);
        #[cfg(feature = "statistics")]
        self.read_count.fetch_add(1, Ordering::Relaxed);
        Some(byte)
    }

    /// Copies as much of `src` as fits, returning the accepted count.
    ///
    /// Best effort: bounded by the free space observed in one snapshot of
    /// the indices, split into a tail segment and a head segment when the
    /// run crosses the end of storage. Never blocks, never waits for
    /// space.
    pub fn write_slice(&self, src: &[u8]) -> usize {
        if self.is_degenerate() || src.is_empty() {
            return 0;
        }
        // Snapshot both indices once; every bound below derives from the
        // snapshot, not live state, so a concurrently draining consumer
        // can only make the computed free space conservative.
        let write = self.write_index.load(Ordering::Relaxed);
        let read = self.read_index.load(Ordering::Acquire);
        let free = self.capacity - 1 - self.occupancy_of(write, read);
        let count = src.len().min(free);
        if count == 0 {
            #[cfg(feature = "statistics")]
            self.overflow_count.fetch_add(1, Ordering::Relaxed);
            return 0;
        }

        let tail_run = self.capacity - write;
        unsafe {
            if count <= tail_run {
                ptr::copy_nonoverlapping(src.as_ptr(), self.storage.add(write), count);
            } else {
                ptr::copy_nonoverlapping(src.as_ptr(), self.storage.add(write), tail_run);
                ptr::copy_nonoverlapping(src.as_ptr().add(tail_run), self.storage, count - tail_run);
            }
        }
        self.write_index
            .store((write + count) % self.capacity, Ordering::Release);

        #[cfg(feature = "statistics")]
        {
            self.write_count.fetch_add(count as u32, Ordering::Relaxed);
            if count < src.len() {
                self.overflow_count.fetch_add(1, Ordering::Relaxed);
            }
        }
        count
    }

    /// Copies up to `dst.len()` buffered bytes into `dst`, returning the
    /// count actually read. Symmetric to [`write_slice`], bounded by
    /// occupancy instead of free space.
    ///
    /// [`write_slice`]: RingState::write_slice
    pub fn read_slice(&self, dst: &mut [u8]) -> usize {
        if self.is_degenerate() || dst.is_empty() {
            return 0;
        }
        let read = self.read_index.load(Ordering::Relaxed);
        let write = self.write_index.load(Ordering::Acquire);
        let available = self.occupancy_of(write, read);
        let count = dst.len().min(available);
        if count == 0 {
            return 0;
        }

        let tail_run = self.capacity - read;
        unsafe {
            if count <= tail_run {
                ptr::copy_nonoverlapping(self.storage.add(read), dst.as_mut_ptr(), count);
            } else {
                ptr::copy_nonoverlapping(self.storage.add(read), dst.as_mut_ptr(), tail_run);
                ptr::copy_nonoverlapping(
                    self.storage,
                    dst.as_mut_ptr().add(tail_run),
                    count - tail_run,
                );
            }
        }
        self.read_index
            .store((read + count) % self.capacity, Ordering::Release);

        #[cfg(feature = "statistics")]
        self.read_count.fetch_add(count as u32, Ordering::Relaxed);
        count
    }

    /// True when no unread data is buffered (a degenerate state always
    /// reads as empty).
    pub fn is_empty(&self) -> bool {
        if self.is_degenerate() {
            return true;
        }
        self.write_index.load(Ordering::Acquire) == self.read_index.load(Ordering::Acquire)
    }

    /// True when one more single-byte write would fail (a degenerate state
    /// is never full).
    pub fn is_full(&self) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let write = self.write_index.load(Ordering::Acquire);
        let read = self.read_index.load(Ordering::Acquire);
        (write + 1) % self.capacity == read
    }

    /// Drops all buffered data by advancing the read index to the write
    /// index.
    ///
    /// Storage bytes are NOT wiped: an observer inspecting the raw region
    /// after `clear` still sees the stale data. That is a deliberate
    /// footprint choice, not a sanitization step — callers with
    /// confidentiality requirements must overwrite the region themselves.
    pub fn clear(&self) {
        if self.is_degenerate() {
            return;
        }
        let write = self.write_index.load(Ordering::Acquire);
        self.read_index.store(write, Ordering::Release);
        #[cfg(feature = "statistics")]
        {
            self.write_count.store(0, Ordering::Relaxed);
            self.read_count.store(0, Ordering::Relaxed);
            self.overflow_count.store(0, Ordering::Relaxed);
        }
    }

    /// Snapshot of the transfer counters.
    #[cfg(feature = "statistics")]
    pub fn stats(&self) -> TransferStats {
        TransferStats {
            writes: self.write_count.load(Ordering::Relaxed),
            reads: self.read_count.load(Ordering::Relaxed),
            overflows: self.overflow_count.load(Ordering::Relaxed),
        }
    }

    /// Consumes the state and returns the caller's storage borrow.
    pub fn into_storage(self) -> &'a mut [u8] {
        unsafe { core::slice::from_raw_parts_mut(self.storage, self.capacity) }
    }
}
