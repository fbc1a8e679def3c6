//! Trade — a completed round-trip (entry → exit) with realized PnL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side the closed position was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Long,
    Short,
}

/// A closed round-trip trade.
///
/// Produced exclusively by the trade ledger when a fill closes (fully or
/// partially) an existing side. Immutable once appended. `pnl` is net of
/// the exit fill's commission plus the pro-rata share of entry commission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: String,
    pub side: TradeSide,
    /// Closed quantity, always positive.
    pub qty: i64,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub pnl: f64,
    pub return_pct: f64,
    pub holding_days: i64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
