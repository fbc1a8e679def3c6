//! Domain types: bars, orders, fills, trades, portfolio.

pub mod bar;
pub mod fill;
pub mod order;
pub mod portfolio;
pub mod trade;

pub use bar::{validate_series, Bar, DataError};
pub use fill::Fill;
pub use order::{Order, OrderType, TimeInForce};
pub use portfolio::{EquityPoint, Portfolio};
pub use trade::{Trade, TradeSide};
