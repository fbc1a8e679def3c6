use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Execution record produced by the broker.
///
/// Fills carry symbol and signed quantity only — they are not correlated
/// back to the order that spawned them. Portfolio and trade ledger consume
/// the same fill stream independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub date: NaiveDate,
    pub symbol: String,
    /// Positive = buy, negative = sell.
    pub qty: i64,
    pub price: f64,
    pub commission: f64,
}
