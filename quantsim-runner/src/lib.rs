//! QuantSim Runner — run configuration, metrics, export, synthetic data.
//!
//! Wraps `quantsim-core`: loads a TOML run configuration, drives a backtest,
//! computes performance metrics from the equity curve, and exports fills,
//! trades, and equity as CSV/JSON for external reporting tools.

pub mod config;
pub mod data;
pub mod export;
pub mod metrics;
pub mod runner;

pub use config::RunConfig;
pub use metrics::PerformanceMetrics;
pub use runner::{run, BacktestResult};
