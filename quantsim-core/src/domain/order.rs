//! Order types and time-in-force.

use serde::{Deserialize, Serialize};

/// What kind of order and its price parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderType {
    /// Fill at the bar's open price.
    Market,
    /// Fill at limit price or better.
    Limit { limit_price: f64 },
    /// Triggers when price reaches the stop level, then fills as market.
    Stop { stop_price: f64 },
}

/// How long an unfilled order remains eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Discarded at end of day regardless of remainder.
    Day,
    /// Good-til-cancelled: persists across days until fully filled.
    Gtc,
    /// Immediate-or-cancel: one fill attempt, then discarded.
    Ioc,
}

/// A single order as submitted to the book.
///
/// Immutable value: quantity reductions produce a new `Order` via
/// [`Order::with_qty`]. Sign convention: positive = buy, negative = sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: String,
    pub qty: i64,
    pub order_type: OrderType,
    /// Free-form label, e.g. "rebalance" or "protective_stop".
    pub tag: String,
    pub allow_partial: bool,
    pub tif: TimeInForce,
}

impl Order {
    pub fn market(symbol: impl Into<String>, qty: i64) -> Self {
        Self {
            symbol: symbol.into(),
            qty,
            order_type: OrderType::Market,
            tag: String::new(),
            allow_partial: true,
            tif: TimeInForce::Day,
        }
    }

    pub fn limit(symbol: impl Into<String>, qty: i64, limit_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            qty,
            order_type: OrderType::Limit { limit_price },
            tag: String::new(),
            allow_partial: true,
            tif: TimeInForce::Day,
        }
    }

    pub fn stop(symbol: impl Into<String>, qty: i64, stop_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            qty,
            order_type: OrderType::Stop { stop_price },
            tag: String::new(),
            allow_partial: true,
            tif: TimeInForce::Day,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_tif(mut self, tif: TimeInForce) -> Self {
        self.tif = tif;
        self
    }

    pub fn all_or_nothing(mut self) -> Self {
        self.allow_partial = false;
        self
    }

    /// A copy of this order with an adjusted quantity.
    pub fn with_qty(&self, qty: i64) -> Self {
        let mut order = self.clone();
        order.qty = qty;
        order
    }

    pub fn is_buy(&self) -> bool {
        self.qty > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_order_defaults() {
        let order = Order::market("SPY", 100);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.tif, TimeInForce::Day);
        assert!(order.allow_partial);
        assert!(order.is_buy());
    }

    #[test]
    fn builders_compose() {
        let order = Order::limit("SPY", -50, 101.5)
            .with_tag("take_profit")
            .with_tif(TimeInForce::Gtc)
            .all_or_nothing();
        assert_eq!(order.order_type, OrderType::Limit { limit_price: 101.5 });
        assert_eq!(order.tag, "take_profit");
        assert_eq!(order.tif, TimeInForce::Gtc);
        assert!(!order.allow_partial);
        assert!(!order.is_buy());
    }

    #[test]
    fn with_qty_leaves_original_untouched() {
        let order = Order::stop("SPY", 100, 95.0);
        let reduced = order.with_qty(40);
        assert_eq!(order.qty, 100);
        assert_eq!(reduced.qty, 40);
        assert_eq!(reduced.order_type, order.order_type);
    }

    #[test]
    fn order_serialization_roundtrip() {
        let order = Order::stop("AAPL", -25, 150.0).with_tif(TimeInForce::Ioc);
        let json = serde_json::to_string(&order).unwrap();
        let deser: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deser);
    }
}
