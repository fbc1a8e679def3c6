//! Moving-average crossover strategy.
//!
//! Classic trend-following: long `units` when the fast SMA is above the
//! slow SMA, short `-units` when below, no opinion until warmed up.

use crate::domain::Bar;
use crate::engine::signal::{Signal, Strategy, TargetIntent};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct MaCross {
    fast_period: usize,
    slow_period: usize,
    units: i64,
    closes: VecDeque<f64>,
}

impl MaCross {
    /// Panics if `fast_period` is zero or not shorter than `slow_period`
    /// (a programming error, consistent with failing fast on bad config).
    pub fn new(fast_period: usize, slow_period: usize, units: i64) -> Self {
        assert!(fast_period > 0, "fast_period must be > 0");
        assert!(
            slow_period > fast_period,
            "slow_period must be > fast_period"
        );
        Self {
            fast_period,
            slow_period,
            units,
            closes: VecDeque::new(),
        }
    }

    fn sma(&self, period: usize) -> Option<f64> {
        if self.closes.len() < period {
            return None;
        }
        let sum: f64 = self.closes.iter().rev().take(period).sum();
        Some(sum / period as f64)
    }
}

impl Strategy for MaCross {
    fn on_bar(&mut self, bar: &Bar) -> Signal {
        self.closes.push_back(bar.close);
        if self.closes.len() > self.slow_period {
            self.closes.pop_front();
        }

        let (Some(fast), Some(slow)) = (self.sma(self.fast_period), self.sma(self.slow_period))
        else {
            return Signal::Hold; // still warming up
        };

        if fast > slow {
            Signal::Target(TargetIntent::Units(self.units))
        } else if fast < slow {
            Signal::Target(TargetIntent::Units(-self.units))
        } else {
            Signal::Hold
        }
    }
}
