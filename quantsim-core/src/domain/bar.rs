//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV bar for a single symbol on a single day.
///
/// Loaded once from a feed and never mutated afterwards. `amount` is the
/// traded notional where the feed provides it (many don't).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub amount: Option<f64>,
}

impl Bar {
    /// Basic OHLCV sanity check: high >= low, high envelopes open/close, etc.
    pub fn is_sane(&self) -> bool {
        if self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Feed-construction errors. The orchestrator never observes out-of-order
/// or malformed bars; they are rejected here, before any simulation starts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{symbol}: bars not strictly increasing at {date}")]
    NonMonotonic { symbol: String, date: NaiveDate },

    #[error("{symbol}: malformed bar at {date}")]
    MalformedBar { symbol: String, date: NaiveDate },
}

/// Validate one symbol's series: strictly increasing dates, sane OHLCV.
pub fn validate_series(symbol: &str, bars: &[Bar]) -> Result<(), DataError> {
    let mut prev: Option<NaiveDate> = None;
    for bar in bars {
        if !bar.is_sane() {
            return Err(DataError::MalformedBar {
                symbol: symbol.to_string(),
                date: bar.date,
            });
        }
        if let Some(prev) = prev {
            if bar.date <= prev {
                return Err(DataError::NonMonotonic {
                    symbol: symbol.to_string(),
                    date: bar.date,
                });
            }
        }
        prev = Some(bar.date);
    }
    Ok(())
}
