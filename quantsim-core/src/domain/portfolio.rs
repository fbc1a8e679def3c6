//! Portfolio — authoritative cash / position / cost-basis ledger.

use super::fill::Fill;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Single point in the equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Aggregate portfolio state.
///
/// Cash and positions change only through [`Portfolio::on_fill`]; the entry
/// price map is recomputed as part of the same fill application and is
/// meaningful only while a symbol's position is non-zero. Symbol maps are
/// `BTreeMap` so iteration order (and therefore the whole run) is
/// deterministic.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub cash: f64,
    pub initial_cash: f64,
    /// Signed units per symbol: positive = long, negative = short.
    pub positions: BTreeMap<String, i64>,
    /// Weighted-average cost basis per open symbol.
    pub entry_price: BTreeMap<String, f64>,
    pub equity_curve: Vec<EquityPoint>,
    /// Daily rate applied to positive cash in `mark_to_market`.
    pub daily_interest_rate: f64,
    /// Daily rate applied to negative cash (typically higher).
    pub daily_borrow_rate: f64,
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            initial_cash,
            positions: BTreeMap::new(),
            entry_price: BTreeMap::new(),
            equity_curve: Vec::new(),
            daily_interest_rate: 0.0,
            daily_borrow_rate: 0.0,
        }
    }

    /// Enable daily financing on cash: interest on credit, borrow on debit.
    pub fn with_financing(mut self, daily_interest_rate: f64, daily_borrow_rate: f64) -> Self {
        self.daily_interest_rate = daily_interest_rate;
        self.daily_borrow_rate = daily_borrow_rate;
        self
    }

    /// Signed units held for a symbol (0 if flat).
    pub fn position(&self, symbol: &str) -> i64 {
        self.positions.get(symbol).copied().unwrap_or(0)
    }

    /// Apply an execution: cash moves by notional plus commission, the
    /// position moves by the signed fill quantity, and the cost basis
    /// follows the open/flip/average/reduce rules.
    pub fn on_fill(&mut self, fill: &Fill) {
        self.cash -= fill.qty as f64 * fill.price + fill.commission;

        let old = self.position(&fill.symbol);
        let new = old + fill.qty;

        if new == 0 {
            self.positions.remove(&fill.symbol);
            self.entry_price.remove(&fill.symbol);
            return;
        }

        self.positions.insert(fill.symbol.clone(), new);

        if old == 0 || old.signum() != new.signum() {
            // Opening from flat, or flipping sign: basis resets to this fill.
            self.entry_price.insert(fill.symbol.clone(), fill.price);
        } else if new.abs() > old.abs() {
            // Same-sign addition: size-weighted average of old basis and fill.
            let prev = self.entry_price.get(&fill.symbol).copied().unwrap_or(fill.price);
            let weighted = (prev * old.abs() as f64 + fill.price * fill.qty.abs() as f64)
                / (old.abs() + fill.qty.abs()) as f64;
            self.entry_price.insert(fill.symbol.clone(), weighted);
        }
        // Same-sign reduction: basis unchanged; realized PnL belongs to the
        // trade ledger, not the portfolio.
    }

    /// Equity at the given prices, without financing or curve recording.
    /// Symbols with no current price are skipped, not zero-valued.
    pub fn total_equity(&self, prices: &BTreeMap<String, f64>) -> f64 {
        let position_value: f64 = self
            .positions
            .iter()
            .filter_map(|(sym, units)| prices.get(sym).map(|p| *units as f64 * p))
            .sum();
        self.cash + position_value
    }

    /// End-of-day mark: one day of financing on non-zero cash, then equity
    /// at the given prices, appended to the curve.
    pub fn mark_to_market(&mut self, date: NaiveDate, prices: &BTreeMap<String, f64>) -> f64 {
        if self.cash != 0.0 {
            let rate = if self.cash > 0.0 {
                self.daily_interest_rate
            } else {
                self.daily_borrow_rate
            };
            self.cash *= 1.0 + rate;
        }
        let equity = self.total_equity(prices);
        tracing::debug!(%date, equity, cash = self.cash, "mark to market");
        self.equity_curve.push(EquityPoint { date, equity });
        equity
    }
}
