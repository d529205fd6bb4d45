//! Error types for order board operations.
//!
//! Only registration and configuration fail with a typed error. Cancelling an
//! unknown or terminal order is an expected outcome and is reported as `false`
//! by [`crate::OrderBoard::cancel_order`] instead.

/// Error returned by the order board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Malformed user name, price, quantity or side.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The identifier space of the board is exhausted. This is a sizing
    /// error; retrying will not succeed.
    #[error("order board capacity of {capacity} orders exceeded")]
    CapacityExceeded { capacity: usize },
}

impl BoardError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BoardError::InvalidArgument(msg.into())
    }
}

/// Result type for order board operations.
pub type BoardResult<T> = Result<T, BoardError>;
