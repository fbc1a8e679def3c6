//! Risk manager — per-symbol unit caps and protective stop synthesis.

use crate::domain::{Order, Portfolio};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Absolute cap on units per symbol. Non-positive disables clamping.
    pub max_units_per_symbol: i64,
    /// Close a position once price moves this fraction against entry.
    /// Non-positive disables protective stops.
    pub stop_loss_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_units_per_symbol: 0,
            stop_loss_pct: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskManager {
    config: RiskConfig,
}

impl RiskManager {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Clip every requested absolute-unit target into `[-cap, +cap]`.
    pub fn clamp_target_units(&self, desired: &BTreeMap<String, i64>) -> BTreeMap<String, i64> {
        let cap = self.config.max_units_per_symbol;
        if cap <= 0 {
            return desired.clone();
        }
        desired
            .iter()
            .map(|(symbol, units)| (symbol.clone(), (*units).clamp(-cap, cap)))
            .collect()
    }

    /// Market orders closing any position whose last price has breached the
    /// stop-loss threshold against its entry. Positions without a last price
    /// or an entry price on record are left alone.
    pub fn protective_stop_orders(
        &self,
        portfolio: &Portfolio,
        latest_prices: &BTreeMap<String, f64>,
    ) -> Vec<Order> {
        if self.config.stop_loss_pct <= 0.0 {
            return Vec::new();
        }

        let mut orders = Vec::new();
        for (symbol, units) in &portfolio.positions {
            if *units == 0 {
                continue;
            }
            let (Some(last), Some(entry)) = (
                latest_prices.get(symbol),
                portfolio.entry_price.get(symbol),
            ) else {
                continue;
            };
            if *entry <= 0.0 {
                continue;
            }
            let breached = if *units > 0 {
                *last < entry * (1.0 - self.config.stop_loss_pct)
            } else {
                *last > entry * (1.0 + self.config.stop_loss_pct)
            };
            if breached {
                orders.push(Order::market(symbol.clone(), -units).with_tag("protective_stop"));
            }
        }
        orders
    }
}
