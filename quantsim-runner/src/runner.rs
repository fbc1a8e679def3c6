//! Run wrapper: configuration in, engine run, metrics out.

use anyhow::{Context, Result};
use quantsim_core::domain::{Bar, EquityPoint, Fill, Trade};
use quantsim_core::engine::{run_backtest_multi, Strategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::RunConfig;
use crate::metrics::PerformanceMetrics;

/// Serializable result of a backtest run: everything external consumers
/// (exporters, servers, report formatters) need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub equity_curve: Vec<EquityPoint>,
    pub fills: Vec<Fill>,
    pub trades: Vec<Trade>,
    pub metrics: PerformanceMetrics,
}

/// Run a configured backtest and compute its metrics.
pub fn run(
    data: &BTreeMap<String, Vec<Bar>>,
    strategies: &mut BTreeMap<String, Box<dyn Strategy>>,
    config: &RunConfig,
) -> Result<BacktestResult> {
    let output = run_backtest_multi(data, strategies, &config.to_backtest_config())
        .context("backtest run failed")?;

    let equity: Vec<f64> = output.equity_curve.iter().map(|p| p.equity).collect();
    Ok(BacktestResult {
        metrics: PerformanceMetrics::compute(&equity),
        equity_curve: output.equity_curve,
        fills: output.fills,
        trades: output.trades,
    })
}
