//! Export — CSV and JSON artifact generation for external reporting code.
//!
//! The core has no file or network surface of its own; exporters turn its
//! plain field records (fills, trades, equity points) into portable text.

use anyhow::{Context, Result};
use quantsim_core::domain::{EquityPoint, Fill, Trade};

use crate::runner::BacktestResult;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a full `BacktestResult` to pretty JSON.
pub fn export_json(result: &BacktestResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize BacktestResult to JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Trade list as CSV.
///
/// Columns: symbol, side, qty, entry_date, entry_price, exit_date,
/// exit_price, pnl, return_pct, holding_days
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "symbol",
        "side",
        "qty",
        "entry_date",
        "entry_price",
        "exit_date",
        "exit_price",
        "pnl",
        "return_pct",
        "holding_days",
    ])?;
    for t in trades {
        wtr.write_record([
            t.symbol.as_str(),
            &format!("{:?}", t.side),
            &t.qty.to_string(),
            &t.entry_date.to_string(),
            &format!("{:.6}", t.entry_price),
            &t.exit_date.to_string(),
            &format!("{:.6}", t.exit_price),
            &format!("{:.6}", t.pnl),
            &format!("{:.6}", t.return_pct),
            &t.holding_days.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().context("CSV writer flush failed")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Fill list as CSV: date, symbol, qty, price, commission.
pub fn export_fills_csv(fills: &[Fill]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "symbol", "qty", "price", "commission"])?;
    for f in fills {
        wtr.write_record([
            f.date.to_string().as_str(),
            f.symbol.as_str(),
            &f.qty.to_string(),
            &format!("{:.6}", f.price),
            &format!("{:.6}", f.commission),
        ])?;
    }
    let bytes = wtr.into_inner().context("CSV writer flush failed")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Equity curve as CSV: date, equity.
pub fn export_equity_csv(curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "equity"])?;
    for point in curve {
        wtr.write_record([point.date.to_string().as_str(), &format!("{:.2}", point.equity)])?;
    }
    let bytes = wtr.into_inner().context("CSV writer flush failed")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
