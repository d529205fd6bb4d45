//! Fixed-scale decimal quantity utilities.
//!
//! ## Overview
//!
//! Quantities are `rust_decimal::Decimal` values with at most
//! [`QUANTITY_SCALE`] fractional digits. Prices are whole currency units and
//! never pass through here.
//!
//! ## Examples
//!
//! ```
//! use silver_board::types::quantity::{format_quantity, parse_quantity};
//!
//! let qty = parse_quantity("3.50").unwrap();
//! assert_eq!(format_quantity(qty), "3.5");
//!
//! assert!(parse_quantity("0").is_err());
//! assert!(parse_quantity("0.000000001").is_err());
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{BoardError, BoardResult};

/// Maximum number of fractional digits a quantity may carry
pub const QUANTITY_SCALE: u32 = 8;

/// Largest quantity a single order may carry (10^12).
///
/// [`MAX_CAPACITY`](crate::config::MAX_CAPACITY) times this value stays
/// representable at [`QUANTITY_SCALE`], so a level total never overflows.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Check that a quantity is strictly positive, at most [`MAX_QUANTITY`] and
/// within [`QUANTITY_SCALE`].
///
/// Trailing zeros do not count against the scale, so `1.500000000` is
/// accepted as `1.5`.
pub fn validate_quantity(quantity: Decimal) -> BoardResult<Decimal> {
    if quantity <= Decimal::ZERO {
        return Err(BoardError::invalid(format!(
            "quantity must be positive, got {quantity}"
        )));
    }

    if quantity > MAX_QUANTITY {
        return Err(BoardError::invalid(format!(
            "quantity {quantity} exceeds the maximum of {MAX_QUANTITY}"
        )));
    }

    let normalized = quantity.normalize();
    if normalized.scale() > QUANTITY_SCALE {
        return Err(BoardError::invalid(format!(
            "quantity {quantity} has more than {QUANTITY_SCALE} decimal places"
        )));
    }

    Ok(quantity)
}

/// Parse and validate a decimal quantity string
pub fn parse_quantity(s: &str) -> BoardResult<Decimal> {
    let quantity = Decimal::from_str(s.trim())
        .map_err(|e| BoardError::invalid(format!("invalid quantity {s:?}: {e}")))?;
    validate_quantity(quantity)
}

/// Render a quantity without trailing zeros
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use silver_board::types::quantity::format_quantity;
///
/// assert_eq!(format_quantity(Decimal::new(550, 2)), "5.5");
/// assert_eq!(format_quantity(Decimal::new(2000, 3)), "2");
/// ```
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
