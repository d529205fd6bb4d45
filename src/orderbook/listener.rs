//! Update listeners.
//!
//! The registry is copy-on-write: subscribe and unsubscribe rebuild the
//! listener list, while a notification only clones an `Arc` to the current
//! list and then calls every listener without holding any lock. Listeners are
//! called synchronously on the mutating thread, in registration order.

use std::sync::Arc;

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::RwLock;
use tracing::trace;

use crate::types::OrderBookSummary;

/// Receives a fresh board summary after every successful mutation.
pub trait OrderUpdateListener: Send + Sync {
    fn on_update(&self, summary: &OrderBookSummary);
}

impl<F> OrderUpdateListener for F
where
    F: Fn(&OrderBookSummary) + Send + Sync,
{
    fn on_update(&self, summary: &OrderBookSummary) {
        self(summary)
    }
}

/// Forwards every summary into a channel.
///
/// Delivery becomes eventual: the receiver observes updates whenever it
/// drains the channel, not while the mutating call is still running.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: Sender<OrderBookSummary>,
}

impl ChannelListener {
    pub fn new(sender: Sender<OrderBookSummary>) -> Self {
        Self { sender }
    }

    /// Create a listener together with the receiving end of its channel
    pub fn unbounded() -> (Self, Receiver<OrderBookSummary>) {
        let (sender, receiver) = channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl OrderUpdateListener for ChannelListener {
    fn on_update(&self, summary: &OrderBookSummary) {
        if self.sender.send(summary.clone()).is_err() {
            trace!("summary receiver dropped, update discarded");
        }
    }
}

type ListenerList = Arc<Vec<Arc<dyn OrderUpdateListener>>>;

/// Read-optimized set of listeners, identified by `Arc` address.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<ListenerList>,
}

fn same_listener(a: &Arc<dyn OrderUpdateListener>, b: &Arc<dyn OrderUpdateListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a listener. Returns `false` if it was already registered.
    pub fn add(&self, listener: Arc<dyn OrderUpdateListener>) -> bool {
        let mut guard = self.listeners.write();
        if guard.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        next.push(listener);
        *guard = Arc::new(next);
        true
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&self, listener: &Arc<dyn OrderUpdateListener>) -> bool {
        let mut guard = self.listeners.write();
        if !guard.iter().any(|l| same_listener(l, listener)) {
            return false;
        }
        let next: Vec<_> = guard
            .iter()
            .filter(|l| !same_listener(l, listener))
            .cloned()
            .collect();
        *guard = Arc::new(next);
        true
    }

    /// Deliver a summary to every listener registered at call time
    pub fn notify(&self, summary: &OrderBookSummary) {
        let snapshot: ListenerList = self.listeners.read().clone();
        trace!(listeners = snapshot.len(), "notifying listeners");
        for listener in snapshot.iter() {
            listener.on_update(summary);
        }
    }
}
