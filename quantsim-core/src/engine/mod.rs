//! Engine: timeline merge, signal contract, allocation, risk, order book,
//! broker, trade ledger, and the orchestration loop.

pub mod allocator;
pub mod broker;
pub mod ledger;
pub mod order_book;
pub mod orchestrator;
pub mod risk;
pub mod signal;
pub mod timeline;

pub use allocator::{AllocatorConfig, ConfigError, Rounding, WeightAllocator};
pub use broker::{Broker, BrokerConfig};
pub use ledger::TradeLedger;
pub use order_book::{BookEntry, OrderBook};
pub use orchestrator::{run_backtest_multi, BacktestConfig, BacktestError, BacktestOutput};
pub use risk::{RiskConfig, RiskManager};
pub use signal::{Signal, Strategy, TargetIntent};
pub use timeline::{MergedTimeline, TimelineStep};
