//! Trade ledger — reconstructs closed round-trips from the fill stream.
//!
//! Average-cost, not FIFO: each symbol carries one open lot with a
//! weighted-average entry price. Runs alongside the portfolio but shares no
//! state with it; both consume the same fills independently.

use crate::domain::{Fill, Trade, TradeSide};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-symbol open side being tracked.
#[derive(Debug, Clone)]
struct OpenLot {
    /// Signed open units.
    qty: i64,
    entry_price: f64,
    entry_date: NaiveDate,
    /// Commission accumulated while building the position, allocated
    /// pro-rata to closes.
    entry_commission: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TradeLedger {
    open: BTreeMap<String, OpenLot>,
    trades: Vec<Trade>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }

    /// Signed open units for a symbol (0 if flat).
    pub fn open_units(&self, symbol: &str) -> i64 {
        self.open.get(symbol).map(|lot| lot.qty).unwrap_or(0)
    }

    /// Average entry price of the open side, if any.
    pub fn open_entry_price(&self, symbol: &str) -> Option<f64> {
        self.open.get(symbol).map(|lot| lot.entry_price)
    }

    pub fn on_fill(&mut self, fill: &Fill) {
        if fill.qty == 0 {
            return;
        }

        let Some(lot) = self.open.get_mut(&fill.symbol) else {
            self.open.insert(
                fill.symbol.clone(),
                OpenLot {
                    qty: fill.qty,
                    entry_price: fill.price,
                    entry_date: fill.date,
                    entry_commission: fill.commission,
                },
            );
            return;
        };

        if lot.qty.signum() == fill.qty.signum() {
            // Same side: weighted-average the basis, accumulate commission.
            lot.entry_price = (lot.entry_price * lot.qty.abs() as f64
                + fill.price * fill.qty.abs() as f64)
                / (lot.qty.abs() + fill.qty.abs()) as f64;
            lot.qty += fill.qty;
            lot.entry_commission += fill.commission;
            return;
        }

        // Opposite side: the overlap closes, the remainder re-opens.
        let closing_qty = lot.qty.abs().min(fill.qty.abs());
        let side = if lot.qty > 0 {
            TradeSide::Long
        } else {
            TradeSide::Short
        };
        let gross = match side {
            TradeSide::Long => (fill.price - lot.entry_price) * closing_qty as f64,
            TradeSide::Short => (lot.entry_price - fill.price) * closing_qty as f64,
        };
        let closing_fraction = closing_qty as f64 / lot.qty.abs() as f64;
        let allocated_entry_commission = lot.entry_commission * closing_fraction;
        let pnl = gross - allocated_entry_commission - fill.commission;

        let entry_notional = lot.entry_price * closing_qty as f64;
        let return_pct = if entry_notional > 0.0 {
            pnl / entry_notional
        } else {
            0.0
        };

        self.trades.push(Trade {
            symbol: fill.symbol.clone(),
            side,
            qty: closing_qty,
            entry_date: lot.entry_date,
            entry_price: lot.entry_price,
            exit_date: fill.date,
            exit_price: fill.price,
            pnl,
            return_pct,
            holding_days: (fill.date - lot.entry_date).num_days(),
        });

        let remainder = lot.qty + fill.qty;
        if remainder == 0 {
            self.open.remove(&fill.symbol);
        } else if remainder.signum() == lot.qty.signum() {
            // Partial close: keep the old basis, shed the allocated commission.
            lot.qty = remainder;
            lot.entry_commission -= allocated_entry_commission;
        } else {
            // Flip-through-zero: leftover opens a new side at this fill.
            lot.qty = remainder;
            lot.entry_price = fill.price;
            lot.entry_date = fill.date;
            lot.entry_commission = 0.0;
        }
    }
}
