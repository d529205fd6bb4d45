//! Fixed-capacity order directory.
//!
//! Slot `i` holds order `i`. The table is allocated once at construction and
//! never grows. Each slot is a `OnceLock`, so it is written at most once and
//! a reader on another thread either sees nothing or the fully built order.
//! Slots are never cleared, cancelled orders included.

use std::sync::{Arc, OnceLock};

use crate::types::{Order, OrderId};

/// O(1) lookup from order identifier to order.
#[derive(Debug)]
pub struct OrderDirectory {
    slots: Box<[OnceLock<Arc<Order>>]>,
}

impl OrderDirectory {
    /// Pre-allocate `capacity` empty slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| OnceLock::new()).collect(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Look up an order. `None` for out-of-range or never-published ids.
    #[inline]
    pub fn get(&self, id: OrderId) -> Option<&Arc<Order>> {
        let index = usize::try_from(id).ok()?;
        self.slots.get(index)?.get()
    }

    /// Publish an order into the slot matching its id.
    ///
    /// Returns `false` if the id is out of range or the slot is taken.
    pub fn publish(&self, order: Arc<Order>) -> bool {
        let Ok(index) = usize::try_from(order.id()) else {
            return false;
        };
        match self.slots.get(index) {
            Some(slot) => slot.set(order).is_ok(),
            None => false,
        }
    }
}
