//! Core data types for the order board
//!
//! ## Types
//!
//! - [`Order`]: A registered order with its lifecycle state
//! - [`Side`]: Buy or Sell
//! - [`OrderState`]: LIVE, FILLED or CANCELLED
//! - [`PriceLevelSummary`]: Aggregate of one price level
//! - [`OrderBookSummary`]: Snapshot of both sides
//!
//! Prices are whole currency units (`u64`). Quantities are fixed-scale
//! decimals, see [`quantity`].

mod order;
mod summary;
pub mod quantity;

/// Order identifier, doubling as the order's directory slot
pub type OrderId = u64;

/// Price in whole currency units
pub type Price = u64;

pub use order::{Order, OrderState, Side};
pub use summary::{OrderBookSummary, PriceLevelSummary};
