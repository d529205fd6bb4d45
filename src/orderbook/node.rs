//! Order node for slab-based chain storage.
//!
//! ## Design
//!
//! `OrderNode` wraps a shared `Order` with doubly-linked list pointers so a
//! price level can unlink any order in O(1). The pointers are slab keys into
//! the level's own chain arena, not references.
//!
//! ## Linked List
//!
//! - `next`: the next (newer) order at this price level
//! - `prev`: the previous (older) order at this price level

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::types::{Order, OrderId};

/// Chain node stored in a price level's slab.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The order, shared with the order directory
    pub order: Arc<Order>,

    /// Next order in the chain (slab key). None if this is the tail.
    pub next: Option<usize>,

    /// Previous order in the chain (slab key). None if this is the head.
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, not yet linked, node
    #[inline]
    pub fn new(order: Arc<Order>) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order.id()
    }

    /// Quantity this node contributes to the level aggregate
    #[inline]
    pub fn live_quantity(&self) -> Option<Decimal> {
        self.order.is_live().then(|| self.order.quantity())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
