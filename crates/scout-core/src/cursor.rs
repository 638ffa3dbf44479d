//! Time sources for the ledger.
//!
//! The ledger reads its cursor on every operation and never caches the
//! result, so a cursor may be moved freely between calls.

use std::cell::Cell;
use std::rc::Rc;

/// Session-relative elapsed time, in ticks of roughly one second.
///
/// Readings must be cheap and free of side effects. Within one session they
/// are normally non-decreasing, but a scrubbed cursor may move backwards.
pub trait TimeCursor {
    /// Returns the current tick.
    fn now(&self) -> u8;
}

impl<F> TimeCursor for F
where
    F: Fn() -> u8,
{
    fn now(&self) -> u8 {
        self()
    }
}

/// A cursor that always reads the same tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedCursor(pub u8);

impl TimeCursor for FixedCursor {
    fn now(&self) -> u8 {
        self.0
    }
}

/// A cursor whose tick is driven from outside the ledger.
///
/// Clones share the same reading: hand one clone to the ledger and keep
/// another to advance it from a timer loop or move it from a scrub bar.
#[derive(Debug, Clone, Default)]
pub struct SharedCursor(Rc<Cell<u8>>);

impl SharedCursor {
    #[must_use]
    pub fn new(tick: u8) -> Self {
        Self(Rc::new(Cell::new(tick)))
    }

    pub fn set(&self, tick: u8) {
        self.0.set(tick);
    }

    /// Moves the cursor forward by `ticks`, saturating at the last tick.
    pub fn advance(&self, ticks: u8) {
        self.0.set(self.0.get().saturating_add(ticks));
    }

    #[must_use]
    pub fn get(&self) -> u8 {
        self.0.get()
    }
}

impl TimeCursor for SharedCursor {
    fn now(&self) -> u8 {
        self.0.get()
    }
}
