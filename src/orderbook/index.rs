//! Per-side price index.
//!
//! Levels live in a `crossbeam_skiplist::SkipMap` keyed by price, which
//! gives O(log P) lookup without a global lock. Keys are always ascending,
//! so the buy side is walked in reverse to yield the best (highest) price
//! first.

use std::sync::Arc;

use crossbeam_skiplist::map::Entry;
use crossbeam_skiplist::SkipMap;
use tracing::trace;

use crate::orderbook::PriceLevel;
use crate::types::{Price, PriceLevelSummary, Side};

/// Concurrent ordered mapping from price to [`PriceLevel`] for one side.
pub struct PriceIndex {
    side: Side,
    levels: SkipMap<Price, Arc<PriceLevel>>,
}

impl PriceIndex {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: SkipMap::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of levels ever created on this side, including empty ones
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Return the level at `price`, creating it if absent.
    ///
    /// Concurrent calls for the same price all receive the same level.
    pub fn level_for(&self, price: Price) -> Arc<PriceLevel> {
        let entry = self.levels.get_or_insert_with(price, || {
            trace!(side = %self.side, price, "allocating price level");
            Arc::new(PriceLevel::new(price))
        });
        Arc::clone(entry.value())
    }

    /// Look up an existing level
    pub fn get(&self, price: Price) -> Option<Arc<PriceLevel>> {
        self.levels.get(&price).map(|entry| Arc::clone(entry.value()))
    }

    /// Prices of all levels, best first
    pub fn prices(&self) -> Vec<Price> {
        match self.side {
            Side::Buy => self.levels.iter().rev().map(|e| *e.key()).collect(),
            Side::Sell => self.levels.iter().map(|e| *e.key()).collect(),
        }
    }

    /// Aggregates of all levels with live quantity, best price first
    pub fn summaries(&self) -> Vec<PriceLevelSummary> {
        match self.side {
            Side::Buy => collect_live(self.levels.iter().rev()),
            Side::Sell => collect_live(self.levels.iter()),
        }
    }
}

fn collect_live<'a>(
    entries: impl Iterator<Item = Entry<'a, Price, Arc<PriceLevel>>>,
) -> Vec<PriceLevelSummary> {
    entries
        .map(|entry| entry.value().summary())
        .filter(PriceLevelSummary::has_quantity)
        .collect()
}
