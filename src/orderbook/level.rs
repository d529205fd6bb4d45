//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` holds every order ever linked at one price on one side.
//! Orders form a doubly-linked chain inside a level-owned slab, in arrival
//! order:
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Any order can be unlinked in O(1) through its chain key
//!
//! ## Locking
//!
//! Chain mutations run under the level's write lock and end by recomputing
//! the cached [`PriceLevelSummary`]. The cache sits behind a version stamp
//! that is odd while a writer is inside the critical section. Readers take
//! the cached value when the stamp is even and unchanged across the read,
//! and otherwise fall back to a read lock and aggregate the chain directly.

use std::sync::atomic::{fence, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::atomic::AtomicCell;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{Order, OrderId, Price, PriceLevelSummary};

/// All orders at a single price, with a cached live aggregate.
#[derive(Debug)]
pub struct PriceLevel {
    price: Price,

    /// Order chain, guarded by the level lock
    chain: RwLock<Chain>,

    /// Even when the cache is stable, odd while a writer is active
    version: AtomicU64,

    /// Aggregate as of the last chain mutation
    cached: AtomicCell<PriceLevelSummary>,
}

#[derive(Debug, Default)]
struct Chain {
    nodes: Slab<OrderNode>,

    /// Oldest order (slab key)
    head: Option<usize>,

    /// Newest order (slab key)
    tail: Option<usize>,
}

impl Chain {
    /// Append an order at the tail and record its chain key on the order.
    fn push_back(&mut self, order: Arc<Order>) -> usize {
        let entry = self.nodes.vacant_entry();
        let key = entry.key();
        order.attach(key);

        let mut node = OrderNode::new(order);
        node.prev = self.tail;
        entry.insert(node);

        match self.tail.and_then(|tail_key| self.nodes.get_mut(tail_key)) {
            Some(tail_node) => tail_node.next = Some(key),
            // Empty list - this is also the head
            None => self.head = Some(key),
        }
        self.tail = Some(key);

        key
    }

    /// Unlink the node at `key` by relinking its neighbours.
    fn unlink(&mut self, key: usize) -> Option<OrderNode> {
        let node = self.nodes.try_remove(key)?;

        match node.prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev_node) => prev_node.next = node.next,
            None => self.head = node.next,
        }

        match node.next.and_then(|next| self.nodes.get_mut(next)) {
            Some(next_node) => next_node.prev = node.prev,
            None => self.tail = node.prev,
        }

        Some(node)
    }

    /// Full scan from head. Non-live orders are skipped, not unlinked.
    ///
    /// Quantities are bounded at registration so the sum cannot overflow.
    fn aggregate(&self, price: Price) -> PriceLevelSummary {
        let mut order_count = 0;
        let mut quantity = Decimal::ZERO;

        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|key| self.nodes.get(key)) {
            if let Some(live) = node.live_quantity() {
                order_count += 1;
                quantity += live;
            }
            cursor = node.next;
        }

        PriceLevelSummary::new(price, order_count, quantity)
    }

    fn order_ids(&self) -> Vec<OrderId> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|key| self.nodes.get(key)) {
            ids.push(node.order_id());
            cursor = node.next;
        }
        ids
    }
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            chain: RwLock::new(Chain::default()),
            version: AtomicU64::new(0),
            cached: AtomicCell::new(PriceLevelSummary::empty(price)),
        }
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Number of orders currently linked, live or not
    pub fn len(&self) -> usize {
        self.chain.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifiers of the linked orders, oldest first
    pub fn order_ids(&self) -> Vec<OrderId> {
        self.chain.read().order_ids()
    }

    /// Link an order as the new tail.
    ///
    /// # Returns
    ///
    /// The chain key assigned to the order
    pub fn add_order(&self, order: Arc<Order>) -> usize {
        self.mutate(|chain| chain.push_back(order))
    }

    /// Unlink an order from this level.
    ///
    /// Returns `false` if the order is not linked here. The order object
    /// itself is left untouched.
    pub fn remove_order(&self, order: &Arc<Order>) -> bool {
        let Some(key) = order.chain_key() else {
            return false;
        };

        self.mutate(|chain| {
            let linked = chain
                .nodes
                .get(key)
                .is_some_and(|node| Arc::ptr_eq(&node.order, order));
            linked && chain.unlink(key).is_some()
        })
    }

    /// Current aggregate of the live orders at this level.
    ///
    /// Never waits on a writer for longer than one read lock acquisition.
    pub fn summary(&self) -> PriceLevelSummary {
        let stamp = self.version.load(Ordering::Acquire);
        if stamp & 1 == 0 {
            let summary = self.cached.load();
            fence(Ordering::Acquire);
            if self.version.load(Ordering::Relaxed) == stamp {
                return summary;
            }
        }

        self.chain.read().aggregate(self.price)
    }

    /// Run a chain mutation under the write lock and refresh the cache.
    fn mutate<R>(&self, f: impl FnOnce(&mut Chain) -> R) -> R {
        let mut chain = self.chain.write();

        self.version.fetch_add(1, Ordering::Relaxed);
        fence(Ordering::Release);

        let result = f(&mut chain);
        self.cached.store(chain.aggregate(self.price));

        self.version.fetch_add(1, Ordering::Release);
        result
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
