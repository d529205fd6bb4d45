//! Order types for the order board.
//!
//! ## Lifecycle
//!
//! ```text
//! LIVE ──cancel──> CANCELLED ──cancel──> CANCELLED (no-op)
//!   │
//!   └──fill────> FILLED ──cancel──> rejected
//! ```
//!
//! The state is stored in an `AtomicU8` and only ever changes through a
//! compare-and-swap, so two threads racing to cancel the same order never
//! both see it as LIVE.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderId, Price};
use crate::error::BoardError;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("buy") {
            Ok(Side::Buy)
        } else if s.eq_ignore_ascii_case("sell") {
            Ok(Side::Sell)
        } else {
            Err(BoardError::invalid(format!("unknown side {s:?}")))
        }
    }
}

// ============================================================================
// OrderState enum
// ============================================================================

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum OrderState {
    /// Resting on the board and counted in aggregates
    Live = 0,
    /// Completely filled. Nothing in this crate produces it.
    Filled = 1,
    /// Cancelled by the owner
    Cancelled = 2,
}

impl OrderState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => OrderState::Live,
            1 => OrderState::Filled,
            _ => OrderState::Cancelled,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order registered on the board.
///
/// Trade attributes are immutable after construction. The lifecycle state is
/// the only field that changes, and the chain key is written exactly once by
/// the price level that links the order.
#[derive(Debug)]
pub struct Order {
    id: OrderId,
    user_name: String,
    side: Side,
    price: Price,
    quantity: Decimal,
    state: AtomicU8,
    /// Key of this order's node inside its price level chain
    chain_key: OnceLock<usize>,
}

impl Order {
    /// Create a new LIVE order.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use silver_board::types::{Order, OrderState, Side};
    ///
    /// let order = Order::new(0, "Nat", Side::Buy, 306, Decimal::new(35, 1));
    /// assert_eq!(order.state(), OrderState::Live);
    /// assert_eq!(order.quantity(), Decimal::new(35, 1));
    /// ```
    pub fn new(
        id: OrderId,
        user_name: impl Into<String>,
        side: Side,
        price: Price,
        quantity: Decimal,
    ) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            side,
            price,
            quantity,
            state: AtomicU8::new(OrderState::Live as u8),
            chain_key: OnceLock::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    #[inline]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Current lifecycle state
    #[inline]
    pub fn state(&self) -> OrderState {
        OrderState::from_u8(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.state() == OrderState::Live
    }

    /// Atomically move from `from` to `to`.
    ///
    /// On failure the state actually observed is returned.
    pub(crate) fn transition(&self, from: OrderState, to: OrderState) -> Result<(), OrderState> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(OrderState::from_u8)
    }

    /// Mark a LIVE order as FILLED, as a matching component would.
    #[cfg(test)]
    pub(crate) fn fill(&self) -> bool {
        self.transition(OrderState::Live, OrderState::Filled).is_ok()
    }

    #[inline]
    pub(crate) fn chain_key(&self) -> Option<usize> {
        self.chain_key.get().copied()
    }

    /// Record the chain key. Only the first call has an effect.
    #[inline]
    pub(crate) fn attach(&self, key: usize) {
        let _ = self.chain_key.set(key);
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} @ {} ({:?})",
            self.id,
            self.user_name,
            self.side,
            self.quantity.normalize(),
            self.price,
            self.state()
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
