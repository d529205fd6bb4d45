//! Board configuration.
//!
//! The only tunable is the directory capacity: the number of order
//! identifiers a board can ever issue. Slots are never reused, so the
//! capacity bounds the lifetime order count, not the live order count.

use crate::error::{BoardError, BoardResult};

/// Default number of order slots (5 * 1024).
pub const DEFAULT_CAPACITY: usize = 5 * 1024;

/// Largest supported capacity (2^29). Bounds the order count of one level.
pub const MAX_CAPACITY: usize = 1 << 29;

/// Construction parameters for an [`crate::OrderBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Size of the order directory, fixed for the lifetime of the board
    pub capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl BoardConfig {
    /// Create a configuration with the given directory capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check the configuration before a board is built from it
    pub fn validate(&self) -> BoardResult<()> {
        if self.capacity == 0 {
            return Err(BoardError::invalid("capacity must be greater than zero"));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(BoardError::invalid(format!(
                "capacity {} exceeds the maximum of {MAX_CAPACITY}",
                self.capacity
            )));
        }
        Ok(())
    }
}
