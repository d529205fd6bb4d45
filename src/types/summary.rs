//! Aggregated views of the board.
//!
//! [`PriceLevelSummary`] is the cached aggregate of one price level and
//! [`OrderBookSummary`] the immutable snapshot handed to callers and
//! listeners. Both compare structurally; quantities compare by value, so
//! `3.5` equals `3.50`.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quantity::format_quantity;
use super::Price;

/// Live order count and cumulative live quantity at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceLevelSummary {
    pub price: Price,
    pub order_count: usize,
    pub quantity: Decimal,
}

impl PriceLevelSummary {
    pub fn new(price: Price, order_count: usize, quantity: Decimal) -> Self {
        Self {
            price,
            order_count,
            quantity,
        }
    }

    /// Aggregate of a level with no live orders
    pub fn empty(price: Price) -> Self {
        Self::new(price, 0, Decimal::ZERO)
    }

    /// Whether this level should appear in a board summary
    #[inline]
    pub fn has_quantity(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

impl fmt::Display for PriceLevelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} ({} orders)",
            format_quantity(self.quantity),
            self.price,
            self.order_count
        )
    }
}

/// Snapshot of both sides of the board, best price first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBookSummary {
    buys: Vec<PriceLevelSummary>,
    sells: Vec<PriceLevelSummary>,
}

impl OrderBookSummary {
    pub fn new(buys: Vec<PriceLevelSummary>, sells: Vec<PriceLevelSummary>) -> Self {
        Self { buys, sells }
    }

    /// Buy levels, highest price first
    pub fn buys(&self) -> &[PriceLevelSummary] {
        &self.buys
    }

    /// Sell levels, lowest price first
    pub fn sells(&self) -> &[PriceLevelSummary] {
        &self.sells
    }

    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }
}

impl fmt::Display for OrderBookSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BUY:")?;
        for level in &self.buys {
            writeln!(f, "  {level}")?;
        }
        writeln!(f, "SELL:")?;
        for level in &self.sells {
            writeln!(f, "  {level}")?;
        }
        Ok(())
    }
}
