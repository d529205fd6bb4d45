//! Stress tests for the order board.
//!
//! These tests verify:
//! 1. Concurrent registrations at one price lose no updates
//! 2. Summaries stay consistent with a sequential reference model
//! 3. Readers running alongside writers always see well-formed snapshots
//! 4. Every successful mutation produces exactly one notification
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use silver_board::{OrderBoard, OrderBookSummary, OrderId, PriceLevelSummary, Side};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Worker threads for concurrent tests
const THREADS: usize = 8;

/// Orders registered per worker thread
const ORDERS_PER_THREAD: usize = 500;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Quantity with two decimal places, distinct per (thread, index)
fn quantity_for(thread: usize, index: usize) -> Decimal {
    Decimal::new((thread * ORDERS_PER_THREAD + index + 1) as i64, 2)
}

/// Buy side must be strictly descending, sell side strictly ascending
fn assert_well_formed(summary: &OrderBookSummary) {
    for pair in summary.buys().windows(2) {
        assert!(pair[0].price > pair[1].price, "buys out of order: {pair:?}");
    }
    for pair in summary.sells().windows(2) {
        assert!(pair[0].price < pair[1].price, "sells out of order: {pair:?}");
    }
    for level in summary.buys().iter().chain(summary.sells()) {
        assert!(level.quantity > Decimal::ZERO);
        assert!(level.order_count > 0);
    }
}

/// Reference aggregate: (side, price) -> (count, quantity) of live orders
#[derive(Default)]
struct Model {
    live: BTreeMap<(bool, u64), (usize, Decimal)>,
}

impl Model {
    fn add(&mut self, side: Side, price: u64, quantity: Decimal) {
        let entry = self
            .live
            .entry((side == Side::Buy, price))
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += quantity;
    }

    fn remove(&mut self, side: Side, price: u64, quantity: Decimal) {
        let key = (side == Side::Buy, price);
        if let Some(entry) = self.live.get_mut(&key) {
            entry.0 -= 1;
            entry.1 -= quantity;
            if entry.0 == 0 {
                self.live.remove(&key);
            }
        }
    }

    fn summary(&self) -> OrderBookSummary {
        let level = |(&(_, price), &(count, qty)): (&(bool, u64), &(usize, Decimal))| {
            PriceLevelSummary::new(price, count, qty)
        };
        let buys = self.live.iter().filter(|((buy, _), _)| *buy).rev().map(level).collect();
        let sells = self.live.iter().filter(|((buy, _), _)| !*buy).map(level).collect();
        OrderBookSummary::new(buys, sells)
    }
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[test]
fn concurrent_registrations_at_one_price() {
    let board = Arc::new(OrderBoard::with_capacity(THREADS * ORDERS_PER_THREAD).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                for i in 0..ORDERS_PER_THREAD {
                    board
                        .register_order(format!("user-{t}"), Side::Buy, 306, quantity_for(t, i))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = THREADS * ORDERS_PER_THREAD;
    let expected_sum: Decimal = (0..THREADS)
        .flat_map(|t| (0..ORDERS_PER_THREAD).map(move |i| quantity_for(t, i)))
        .sum();

    let summary = board.summary();
    assert_eq!(summary.buys(), &[PriceLevelSummary::new(306, total, expected_sum)]);
    assert!(summary.sells().is_empty());
}

#[test]
fn concurrent_register_and_cancel_settles_to_survivors() {
    let board = Arc::new(OrderBoard::with_capacity(THREADS * ORDERS_PER_THREAD).unwrap());

    // Each thread registers across a few prices and cancels every other order
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                let mut kept = Vec::new();
                for i in 0..ORDERS_PER_THREAD {
                    let side = if t % 2 == 0 { Side::Buy } else { Side::Sell };
                    let price = 300 + (i % 5) as u64;
                    let id = board.register_order("stress", side, price, Decimal::ONE).unwrap();
                    if i % 2 == 0 {
                        assert!(board.cancel_order(id));
                    } else {
                        kept.push((side, price));
                    }
                }
                kept
            })
        })
        .collect();

    let mut model = Model::default();
    for handle in handles {
        for (side, price) in handle.join().unwrap() {
            model.add(side, price, Decimal::ONE);
        }
    }

    let summary = board.summary();
    assert_well_formed(&summary);
    assert_eq!(summary, model.summary());
}

#[test]
fn readers_see_well_formed_snapshots_during_writes() {
    let board = Arc::new(OrderBoard::with_capacity(THREADS * ORDERS_PER_THREAD).unwrap());
    let writers_done = Arc::new(AtomicUsize::new(0));
    let writer_count = THREADS / 2;

    let writers: Vec<_> = (0..writer_count)
        .map(|t| {
            let board = Arc::clone(&board);
            let writers_done = Arc::clone(&writers_done);
            thread::spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(t as u64);
                for _ in 0..ORDERS_PER_THREAD {
                    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
                    let price = rng.gen_range(290..=320);
                    let id = board.register_order("writer", side, price, Decimal::ONE).unwrap();
                    if rng.gen_bool(0.3) {
                        board.cancel_order(id);
                    }
                }
                writers_done.fetch_add(1, Ordering::Release);
            })
        })
        .collect();

    let readers: Vec<_> = (0..THREADS - writer_count)
        .map(|_| {
            let board = Arc::clone(&board);
            let writers_done = Arc::clone(&writers_done);
            thread::spawn(move || {
                let mut snapshots = 0usize;
                while writers_done.load(Ordering::Acquire) < writer_count {
                    assert_well_formed(&board.summary());
                    snapshots += 1;
                }
                snapshots
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    for reader in readers {
        reader.join().unwrap();
    }

    assert_well_formed(&board.summary());
}

#[test]
fn one_notification_per_successful_mutation() {
    let board = Arc::new(OrderBoard::with_capacity(THREADS * ORDERS_PER_THREAD).unwrap());
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    board.add_update_listener(Arc::new(move |summary: &OrderBookSummary| {
        assert_well_formed(summary);
        counter.fetch_add(1, Ordering::Relaxed);
    }));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                let mut mutations = 0usize;
                for i in 0..ORDERS_PER_THREAD {
                    let id = board
                        .register_order("notify", Side::Sell, 500 + t as u64, Decimal::ONE)
                        .unwrap();
                    mutations += 1;
                    if i % 3 == 0 {
                        // Second cancel is a no-op and must stay silent
                        assert!(board.cancel_order(id));
                        assert!(board.cancel_order(id));
                        mutations += 1;
                    }
                }
                mutations
            })
        })
        .collect();

    let expected: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(notifications.load(Ordering::Relaxed), expected);
}

/// Seeded random register/cancel sequence checked against the model after
/// every step.
#[test]
fn random_sequence_matches_reference_model() {
    const STEPS: usize = 5_000;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let board = OrderBoard::with_capacity(STEPS).unwrap();
    let mut model = Model::default();
    let mut issued: Vec<(OrderId, Side, u64, Decimal)> = Vec::new();

    let start = Instant::now();
    for _ in 0..STEPS {
        if issued.is_empty() || rng.gen_bool(0.6) {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = rng.gen_range(95..=105);
            let quantity = Decimal::new(rng.gen_range(1..=1_000), 2);
            let id = board.register_order("model", side, price, quantity).unwrap();
            model.add(side, price, quantity);
            issued.push((id, side, price, quantity));
        } else {
            let (id, side, price, quantity) = issued[rng.gen_range(0..issued.len())];
            let was_live = board.order(id).unwrap().is_live();
            assert!(board.cancel_order(id));
            if was_live {
                model.remove(side, price, quantity);
            }
        }

        let summary = board.summary();
        assert_well_formed(&summary);
        assert_eq!(summary, model.summary());
    }

    // Invalid cancels never disturb the board
    let before = board.summary();
    assert!(!board.cancel_order(-1));
    assert!(!board.cancel_order(STEPS as u64));
    assert_eq!(board.summary(), before);

    println!("  {} steps in {:.2?}", STEPS, start.elapsed());
}
