//! Order board storage and aggregation.
//!
//! ## Architecture
//!
//! - **Slab-based chains**: each price level owns a slab of order nodes
//!   linked in arrival order, so any order unlinks in O(1)
//! - **Price index**: concurrent skip list per side, best price first
//! - **Order directory**: pre-allocated write-once slots indexed by order id
//!
//! ## Components
//!
//! - [`OrderNode`]: `Order` handle plus chain pointers
//! - [`PriceLevel`]: chain, lock and cached aggregate for one price
//! - [`PriceIndex`]: ordered price levels of one side
//! - [`OrderDirectory`]: id to order lookup
//! - [`ListenerRegistry`]: update subscribers
//! - [`OrderBoard`]: the coordinator
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Register order | O(log P + L) |
//! | Cancel order by ID | O(log P + L) |
//! | Summary | O(P) |
//!
//! P is the number of price levels on a side and L the chain length at the
//! touched level (aggregate recomputation).

pub mod node;
pub mod level;
pub mod index;
pub mod directory;
pub mod listener;
pub mod board;

pub use node::OrderNode;
pub use level::PriceLevel;
pub use index::PriceIndex;
pub use directory::OrderDirectory;
pub use listener::{ChannelListener, ListenerRegistry, OrderUpdateListener};
pub use board::OrderBoard;
