//! QuantSim Core — multi-asset backtesting engine.
//!
//! Replays historical bars through strategies, turns intents into orders,
//! simulates fills against a synthetic broker, and tracks portfolio state:
//! - Domain types (bars, orders, fills, trades, portfolio)
//! - Merged multi-symbol timeline
//! - Weight allocator and risk manager
//! - Per-day order book with time-in-force semantics
//! - Fill simulator with slippage, commission, and volume-capped partials
//! - Average-cost trade ledger
//! - The `run_backtest_multi` orchestration loop

pub mod domain;
pub mod engine;
pub mod strategies;

pub use domain::{Bar, DataError, EquityPoint, Fill, Order, OrderType, Portfolio, TimeInForce, Trade, TradeSide};
pub use engine::{
    run_backtest_multi, AllocatorConfig, BacktestConfig, BacktestError, BacktestOutput, Broker,
    BrokerConfig, ConfigError, RiskConfig, RiskManager, Rounding, Signal, Strategy, TargetIntent,
    TradeLedger, WeightAllocator,
};
