//! # Silver Board
//!
//! Concurrent in-memory limit order board.
//!
//! ## Architecture
//!
//! - **Types**: Order, Side, lifecycle state and summary snapshots
//! - **OrderBook**: price levels, price indexes, order directory, listeners
//!   and the [`OrderBoard`] coordinator
//! - **Command**: line-oriented console command parsing and execution
//!
//! ## Design Principles
//!
//! 1. **No Floating Point**: quantities are fixed-scale decimals
//! 2. **Pre-allocated Memory**: the order directory is sized once and slots
//!    are never reused
//! 3. **Per-level Locking**: mutations at different prices never contend
//! 4. **Synchronous Notification**: listeners see every mutation on the
//!    calling thread, after it is visible in [`OrderBoard::summary`]
//!
//! No matching takes place: buy and sell orders only rest and aggregate.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, summaries
pub mod types;

/// Order board: price levels, indexes, directory and coordinator
pub mod orderbook;

/// Console command parsing and execution
pub mod command;

/// Board configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{BoardConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use error::{BoardError, BoardResult};
pub use orderbook::{ChannelListener, OrderBoard, OrderUpdateListener};
pub use types::{Order, OrderBookSummary, OrderId, OrderState, Price, PriceLevelSummary, Side};
