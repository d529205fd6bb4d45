//! Order board coordinator.
//!
//! ## Architecture
//!
//! - **PriceIndex** (one per side): skip list of price levels, best first
//! - **OrderDirectory**: pre-allocated slots for O(1) lookup by id
//! - **ListenerRegistry**: copy-on-write list of update listeners
//!
//! Every successful register or cancel recomputes the full summary from the
//! levels' cached aggregates and hands it to every listener on the calling
//! thread. Two racing mutations may deliver their summaries in either order.
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use silver_board::{OrderBoard, Side};
//!
//! let board = OrderBoard::new();
//! let id = board.register_order("Nat", Side::Buy, 306, Decimal::new(35, 1)).unwrap();
//!
//! assert_eq!(board.summary().buys()[0].price, 306);
//! assert!(board.cancel_order(id));
//! assert!(board.summary().is_empty());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};
use crate::orderbook::{ListenerRegistry, OrderDirectory, OrderUpdateListener, PriceIndex};
use crate::types::quantity::validate_quantity;
use crate::types::{Order, OrderBookSummary, OrderId, OrderState, Price, Side};

/// Concurrent limit order board.
///
/// All operations take `&self`; share the board between threads with an
/// `Arc`.
pub struct OrderBoard {
    /// Buy price levels, highest first
    buys: PriceIndex,

    /// Sell price levels, lowest first
    sells: PriceIndex,

    /// Order id to order, slot per id
    directory: OrderDirectory,

    /// Next order id to hand out
    next_order_id: AtomicU64,

    listeners: ListenerRegistry,
}

impl Default for OrderBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBoard {
    /// Create a board with the default capacity
    pub fn new() -> Self {
        Self::build(BoardConfig::default())
    }

    /// Create a board from a validated configuration
    pub fn with_config(config: BoardConfig) -> BoardResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create a board able to issue `capacity` order ids
    ///
    /// # Example
    ///
    /// ```
    /// use silver_board::OrderBoard;
    ///
    /// let board = OrderBoard::with_capacity(100).unwrap();
    /// assert_eq!(board.capacity(), 100);
    /// assert!(OrderBoard::with_capacity(0).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> BoardResult<Self> {
        Self::with_config(BoardConfig::with_capacity(capacity))
    }

    fn build(config: BoardConfig) -> Self {
        debug!(capacity = config.capacity, "creating order board");
        Self {
            buys: PriceIndex::new(Side::Buy),
            sells: PriceIndex::new(Side::Sell),
            directory: OrderDirectory::with_capacity(config.capacity),
            next_order_id: AtomicU64::new(0),
            listeners: ListenerRegistry::new(),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Total number of order ids this board can issue
    #[inline]
    pub fn capacity(&self) -> usize {
        self.directory.capacity()
    }

    /// Number of order ids issued so far
    pub fn issued(&self) -> usize {
        let issued = self.next_order_id.load(Ordering::Acquire);
        usize::try_from(issued).map_or(self.capacity(), |n| n.min(self.capacity()))
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn index(&self, side: Side) -> &PriceIndex {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Register a new LIVE order and notify listeners.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an empty user name, a zero price, or a
    ///   quantity that is not positive, above `MAX_QUANTITY` or beyond the
    ///   quantity scale. No identifier is consumed.
    /// - `CapacityExceeded` once every identifier has been issued. Nothing is
    ///   registered.
    pub fn register_order(
        &self,
        user_name: impl Into<String>,
        side: Side,
        price: Price,
        quantity: Decimal,
    ) -> BoardResult<OrderId> {
        let user_name = user_name.into();
        if user_name.trim().is_empty() {
            return Err(BoardError::invalid("user name must not be empty"));
        }
        if price == 0 {
            return Err(BoardError::invalid("price must be positive"));
        }
        let quantity = validate_quantity(quantity)?;

        let id = self.allocate_id()?;
        let order = Arc::new(Order::new(id, user_name, side, price, quantity));

        self.index(side).level_for(price).add_order(Arc::clone(&order));
        let published = self.directory.publish(order);
        debug_assert!(published, "order id {id} published twice");

        info!(order_id = id, %side, price, %quantity, "registered order");
        self.publish_summary();
        Ok(id)
    }

    /// Cancel an order.
    ///
    /// Returns `false` for identifiers that are negative, out of range or
    /// never issued, and for FILLED orders. Cancelling an already cancelled
    /// order returns `true` and changes nothing.
    pub fn cancel_order<I: TryInto<OrderId>>(&self, order_id: I) -> bool {
        let Ok(order_id) = order_id.try_into() else {
            debug!("cancel rejected: identifier is not a valid order id");
            return false;
        };
        let Some(order) = self.directory.get(order_id).cloned() else {
            debug!(order_id, "cancel rejected: unknown order");
            return false;
        };

        match order.transition(OrderState::Live, OrderState::Cancelled) {
            Ok(()) => {}
            Err(OrderState::Cancelled) => return true,
            Err(state) => {
                debug!(order_id, ?state, "cancel rejected: order is not live");
                return false;
            }
        }

        match self.index(order.side()).get(order.price()) {
            Some(level) => {
                level.remove_order(&order);
            }
            None => warn!(order_id, price = order.price(), "cancelled order has no price level"),
        }

        info!(
            order_id,
            side = %order.side(),
            price = order.price(),
            quantity = %order.quantity(),
            "cancelled order"
        );
        self.publish_summary();
        true
    }

    /// Look up an order by id, whatever its state
    pub fn order(&self, order_id: OrderId) -> Option<Arc<Order>> {
        self.directory.get(order_id).cloned()
    }

    // ========================================================================
    // Summary and Listeners
    // ========================================================================

    /// Snapshot of live quantity per price, best price first on each side
    pub fn summary(&self) -> OrderBookSummary {
        OrderBookSummary::new(self.buys.summaries(), self.sells.summaries())
    }

    /// Subscribe to updates. Returns `false` if already subscribed.
    pub fn add_update_listener(&self, listener: Arc<dyn OrderUpdateListener>) -> bool {
        self.listeners.add(listener)
    }

    /// Unsubscribe. Returns `false` if the listener was not subscribed.
    pub fn remove_update_listener(&self, listener: &Arc<dyn OrderUpdateListener>) -> bool {
        self.listeners.remove(listener)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Take the next id without ever moving the counter past capacity.
    fn allocate_id(&self) -> BoardResult<OrderId> {
        let capacity = self.capacity() as u64;
        self.next_order_id
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next < capacity).then_some(next + 1)
            })
            .map_err(|_| {
                warn!(capacity, "order board is full");
                BoardError::CapacityExceeded {
                    capacity: self.capacity(),
                }
            })
    }

    fn publish_summary(&self) {
        let summary = self.summary();
        self.listeners.notify(&summary);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
