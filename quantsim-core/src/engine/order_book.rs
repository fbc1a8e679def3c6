//! Order book — per-symbol queues of in-flight orders.

use crate::domain::Order;
use std::collections::BTreeMap;

/// An order paired with its remaining-quantity counter.
///
/// `remaining` carries the order's sign (positive = buy) and shrinks in
/// magnitude as partial fills occur. Entries are never aliased between
/// symbols; each symbol's queue owns its entries outright.
#[derive(Debug, Clone)]
pub struct BookEntry {
    pub order: Order,
    pub remaining: i64,
}

impl BookEntry {
    pub fn new(order: Order) -> Self {
        let remaining = order.qty;
        Self { order, remaining }
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }
}

/// Append-ordered pending orders keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    entries: BTreeMap<String, Vec<BookEntry>>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fresh entry with `remaining` equal to the requested quantity.
    /// Zero-quantity orders are ignored.
    pub fn submit(&mut self, order: Order) {
        if order.qty == 0 {
            return;
        }
        self.entries
            .entry(order.symbol.clone())
            .or_default()
            .push(BookEntry::new(order));
    }

    /// Take this symbol's queue out of the book (for a broker pass).
    /// Returns an empty queue if the symbol has no pending orders.
    pub fn take(&mut self, symbol: &str) -> Vec<BookEntry> {
        self.entries.remove(symbol).unwrap_or_default()
    }

    /// Put surviving entries back after a broker pass.
    pub fn put_back(&mut self, symbol: &str, entries: Vec<BookEntry>) {
        if !entries.is_empty() {
            self.entries.insert(symbol.to_string(), entries);
        }
    }

    /// End-of-day sweep: only GTC entries with quantity left survive into
    /// tomorrow. DAY and IOC entries die here even if the broker never saw
    /// them (their symbol may have had no bar today).
    pub fn expire_end_of_day(&mut self) {
        for entries in self.entries.values_mut() {
            entries.retain(|e| e.order.tif == crate::domain::TimeInForce::Gtc && !e.is_done());
        }
        self.entries.retain(|_, entries| !entries.is_empty());
    }

    pub fn pending(&self, symbol: &str) -> &[BookEntry] {
        self.entries.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
