//! Orchestrator — the per-day simulation loop.
//!
//! Drives the merged timeline, routes strategy signals through the allocator
//! and risk manager into the order book, runs the broker per symbol, applies
//! fills to the portfolio and trade ledger, and marks to market. Everything
//! is single-threaded and deterministic: symbol maps are `BTreeMap` and
//! fills are applied in generation order.

use crate::domain::{
    validate_series, Bar, DataError, EquityPoint, Fill, Order, Portfolio, TimeInForce, Trade,
};
use crate::engine::allocator::{AllocatorConfig, ConfigError, WeightAllocator};
use crate::engine::broker::{Broker, BrokerConfig};
use crate::engine::ledger::TradeLedger;
use crate::engine::order_book::OrderBook;
use crate::engine::risk::{RiskConfig, RiskManager};
use crate::engine::signal::{Signal, Strategy, TargetIntent};
use crate::engine::timeline::MergedTimeline;
use std::collections::BTreeMap;
use thiserror::Error;

/// Everything a run needs besides data and strategies.
#[derive(Debug, Clone, Default)]
pub struct BacktestConfig {
    pub initial_cash: f64,
    pub daily_interest_rate: f64,
    pub daily_borrow_rate: f64,
    pub broker: BrokerConfig,
    pub risk: RiskConfig,
    /// Required for strategies that emit weight targets; weight signals are
    /// warned about and dropped when absent.
    pub allocator: Option<AllocatorConfig>,
}

/// Errors that abort a run before its loop starts.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What a completed run hands to consumers (metrics, exporters, servers).
#[derive(Debug)]
pub struct BacktestOutput {
    pub fills: Vec<Fill>,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub portfolio: Portfolio,
}

/// Run a multi-asset backtest over the merged timeline.
///
/// Feed validation happens up front; strategy panics are not caught. Each
/// day: signals → allocation → risk → order book → broker → fills →
/// mark-to-market, fully processed before the next day begins.
pub fn run_backtest_multi(
    data: &BTreeMap<String, Vec<Bar>>,
    strategies: &mut BTreeMap<String, Box<dyn Strategy>>,
    config: &BacktestConfig,
) -> Result<BacktestOutput, BacktestError> {
    for (symbol, bars) in data {
        validate_series(symbol, bars)?;
    }
    let allocator = config
        .allocator
        .clone()
        .map(WeightAllocator::new)
        .transpose()?;

    let broker = Broker::new(config.broker.clone());
    let risk = RiskManager::new(config.risk.clone());
    let mut portfolio = Portfolio::new(config.initial_cash)
        .with_financing(config.daily_interest_rate, config.daily_borrow_rate);
    let mut ledger = TradeLedger::new();
    let mut book = OrderBook::new();
    let mut all_fills: Vec<Fill> = Vec::new();

    // Closing prices observed so far; stale closes serve symbols with no
    // bar today (stops, equity marks).
    let mut last_close: BTreeMap<String, f64> = BTreeMap::new();

    for step in MergedTimeline::new(data) {
        for (symbol, bar) in &step.events {
            last_close.insert(symbol.clone(), bar.close);
        }

        // Phase 1: signals.
        let mut unit_targets: BTreeMap<String, i64> = BTreeMap::new();
        let mut weight_targets: BTreeMap<String, f64> = BTreeMap::new();
        let mut raw_orders: Vec<Order> = Vec::new();

        for (symbol, bar) in &step.events {
            let Some(strategy) = strategies.get_mut(symbol) else {
                continue;
            };
            match strategy.on_bar(bar) {
                Signal::Hold => {}
                Signal::Target(TargetIntent::Units(units)) => {
                    unit_targets.insert(symbol.clone(), units);
                }
                Signal::Target(TargetIntent::Weight(weight)) => {
                    weight_targets.insert(symbol.clone(), weight);
                }
                Signal::Orders(orders) => raw_orders.extend(orders),
            }
        }

        // Phase 2: weights through the allocator.
        if !weight_targets.is_empty() {
            match &allocator {
                Some(allocator) => {
                    let equity = portfolio.total_equity(&last_close);
                    let allocated =
                        allocator.weights_to_units(&weight_targets, equity, &last_close);
                    unit_targets.extend(allocated);
                }
                None => {
                    tracing::warn!(
                        date = %step.date,
                        symbols = ?weight_targets.keys().collect::<Vec<_>>(),
                        "weight signals dropped: no allocator configured"
                    );
                }
            }
        }

        // Phase 3: risk clamp, then targets become delta orders.
        for (symbol, target) in risk.clamp_target_units(&unit_targets) {
            let delta = target - portfolio.position(&symbol);
            if delta != 0 {
                raw_orders.push(Order::market(symbol, delta).with_tag("target"));
            }
        }
        raw_orders.extend(risk.protective_stop_orders(&portfolio, &last_close));

        for order in raw_orders {
            book.submit(order);
        }

        // Phase 4: broker pass per symbol present today, fills applied in
        // generation order to both portfolio and ledger.
        for (symbol, bar) in &step.events {
            let mut entries = book.take(symbol);
            let fills = broker.process_orders(bar, &mut entries);
            // IOC dies right after its attempt; DAY survives until the
            // end-of-day sweep (it only gets this one attempt anyway).
            entries.retain(|e| !e.is_done() && e.order.tif != TimeInForce::Ioc);
            book.put_back(symbol, entries);

            for fill in fills {
                portfolio.on_fill(&fill);
                ledger.on_fill(&fill);
                all_fills.push(fill);
            }
        }

        // Phase 5: end of day.
        book.expire_end_of_day();
        portfolio.mark_to_market(step.date, &last_close);
    }

    Ok(BacktestOutput {
        fills: all_fills,
        trades: ledger.into_trades(),
        equity_curve: portfolio.equity_curve.clone(),
        portfolio,
    })
}
