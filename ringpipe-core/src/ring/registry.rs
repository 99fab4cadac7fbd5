//! Process-wide custom-strategy registry
//!
//! A fixed table of [`MAX_CUSTOM_STRATEGIES`] slots keyed by strategy tag.
//! Registration is append-only and irrevocable for the life of the
//! process; a slot can never be reused or replaced, so a buffer created
//! against a registered descriptor can never see it disappear.
//!
//! The table sits behind a [`critical_section::Mutex`], which makes
//! registration and lookup safe from any context on bare metal and from
//! plain threads on hosted targets.

use core::cell::RefCell;

use critical_section::Mutex;

use super::strategy::{StrategyKind, StrategyOps};
use crate::error::{RingError, RingResult};

/// Maximum number of custom strategies registrable per process.
pub const MAX_CUSTOM_STRATEGIES: usize = 4;

#[derive(Clone, Copy)]
struct Slot {
    tag: u8,
    ops: &'static dyn StrategyOps,
}

struct Table {
    slots: [Option<Slot>; MAX_CUSTOM_STRATEGIES],
    len: usize,
}

impl Table {
    const fn new() -> Self {
        Self {
            slots: [None; MAX_CUSTOM_STRATEGIES],
            len: 0,
        }
    }
}

static CUSTOM_STRATEGIES: Mutex<RefCell<Table>> = Mutex::new(RefCell::new(Table::new()));

/// Registers a custom strategy descriptor under `tag`.
///
/// Rejects tags below [`StrategyKind::CUSTOM_BASE`] with
/// [`RingError::InvalidArgument`], duplicate tags and a full table with
/// [`RingError::ResourceExhausted`]. There is no unregister.
pub fn register_custom(tag: u8, ops: &'static dyn StrategyOps) -> RingResult<()> {
    if tag < StrategyKind::CUSTOM_BASE {
        return Err(RingError::invalid_argument(
            "custom strategy tag below CUSTOM_BASE",
        ));
    }
    critical_section::with(|cs| {
        let mut table = CUSTOM_STRATEGIES.borrow(cs).borrow_mut();
        if table.slots[..table.len].iter().any(|slot| {
            matches!(slot, Some(existing) if existing.tag == tag)
        }) {
            return Err(RingError::resource_exhausted(
                RingError::RESOURCE_TYPE_REGISTRY,
                "strategy tag already registered",
            ));
        }
        if table.len == MAX_CUSTOM_STRATEGIES {
            return Err(RingError::resource_exhausted(
                RingError::RESOURCE_TYPE_REGISTRY,
                "custom strategy registry full",
            ));
        }
        let index = table.len;
        table.slots[index] = Some(Slot { tag, ops });
        table.len += 1;
        Ok(())
    })?;

    #[cfg(feature = "defmt")]
    defmt::trace!("custom strategy registered: tag={}", tag);
    Ok(())
}

/// Looks up a registered descriptor by tag.
pub(crate) fn lookup(tag: u8) -> Option<&'static dyn StrategyOps> {
    critical_section::with(|cs| {
        let table = CUSTOM_STRATEGIES.borrow(cs).borrow();
        table.slots[..table.len]
            .iter()
            .flatten()
            .find(|slot| slot.tag == tag)
            .map(|slot| slot.ops)
    })
}
