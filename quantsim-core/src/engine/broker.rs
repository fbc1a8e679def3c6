//! Broker — synthetic fill simulator.
//!
//! Evaluates pending orders against one day's OHLCV bar: trigger checks for
//! market/limit/stop, adverse slippage in basis points, per-share plus
//! notional commission, and a volume cap that produces partial fills.

use crate::domain::{Bar, Fill, OrderType};
use crate::engine::order_book::BookEntry;
use serde::{Deserialize, Serialize};

/// Execution parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Slippage in basis points, applied against the trader's direction.
    pub slippage_bps: f64,
    /// Fixed commission per unit traded.
    pub commission_per_share: f64,
    /// Commission as a fraction of traded notional.
    pub commission_rate: f64,
    /// Max fraction of a bar's volume one order may take per day.
    /// Non-positive disables the cap.
    pub volume_limit: f64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            slippage_bps: 0.0,
            commission_per_share: 0.0,
            commission_rate: 0.0,
            volume_limit: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Broker {
    config: BrokerConfig,
}

impl Broker {
    pub fn new(config: BrokerConfig) -> Self {
        Self { config }
    }

    /// Attempt every pending entry against today's bar, in append order.
    ///
    /// Filled quantity is deducted from each entry's `remaining`; the caller
    /// decides what happens to unfilled remainders (time-in-force is the
    /// orchestrator's concern). Fills come back in entry order.
    pub fn process_orders(&self, bar: &Bar, entries: &mut [BookEntry]) -> Vec<Fill> {
        let mut fills = Vec::new();

        for entry in entries.iter_mut() {
            if entry.is_done() {
                continue;
            }
            let Some(raw_price) = self.candidate_price(&entry.order.order_type, entry.remaining > 0, bar)
            else {
                continue; // trigger condition not met today
            };
            if raw_price <= 0.0 {
                tracing::warn!(
                    symbol = %entry.order.symbol,
                    date = %bar.date,
                    raw_price,
                    "skipping order with non-positive candidate price"
                );
                continue;
            }

            let fill_price = self.apply_slippage(raw_price, entry.remaining > 0);

            let mut exec_units = entry.remaining.abs();
            if self.config.volume_limit > 0.0 {
                let cap = (bar.volume * self.config.volume_limit).floor() as i64;
                exec_units = exec_units.min(cap);
            }
            if exec_units <= 0 {
                continue;
            }
            if exec_units < entry.remaining.abs() && !entry.order.allow_partial {
                // All-or-nothing order that cannot fill in full today.
                continue;
            }

            let qty = exec_units * entry.remaining.signum();
            let commission = exec_units as f64 * self.config.commission_per_share
                + (exec_units as f64 * fill_price) * self.config.commission_rate;

            entry.remaining -= qty;
            fills.push(Fill {
                date: bar.date,
                symbol: entry.order.symbol.clone(),
                qty,
                price: fill_price,
                commission,
            });
        }

        fills
    }

    /// Pre-slippage execution price, or None when the order doesn't trigger.
    fn candidate_price(&self, order_type: &OrderType, is_buy: bool, bar: &Bar) -> Option<f64> {
        match order_type {
            OrderType::Market => Some(bar.open),
            OrderType::Limit { limit_price } => {
                if is_buy {
                    // Buy at limit or better: needs the bar to trade down to it.
                    (bar.low <= *limit_price).then(|| limit_price.min(bar.open))
                } else {
                    (bar.high >= *limit_price).then(|| limit_price.max(bar.open))
                }
            }
            OrderType::Stop { stop_price } => {
                if is_buy {
                    // Gap-through opens fill at the worse of stop and open.
                    (bar.high >= *stop_price).then(|| stop_price.max(bar.open))
                } else {
                    (bar.low <= *stop_price).then(|| stop_price.min(bar.open))
                }
            }
        }
    }

    fn apply_slippage(&self, price: f64, is_buy: bool) -> f64 {
        let adjustment = self.config.slippage_bps / 10_000.0;
        if is_buy {
            price * (1.0 + adjustment)
        } else {
            price * (1.0 - adjustment)
        }
    }
}
