//! Fixed-weight strategy: always requests the same portfolio weight.
//!
//! Rebalancing happens implicitly — the allocator recomputes units from
//! current equity every day, and the engine trades only the delta.

use crate::domain::Bar;
use crate::engine::signal::{Signal, Strategy, TargetIntent};

#[derive(Debug, Clone)]
pub struct FixedWeight {
    weight: f64,
}

impl FixedWeight {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Strategy for FixedWeight {
    fn on_bar(&mut self, _bar: &Bar) -> Signal {
        Signal::Target(TargetIntent::Weight(self.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn always_emits_its_weight() {
        let mut strategy = FixedWeight::new(0.25);
        let bar = Bar {
            symbol: "SPY".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.0,
            volume: 1_000.0,
            amount: None,
        };
        assert_eq!(
            strategy.on_bar(&bar),
            Signal::Target(TargetIntent::Weight(0.25))
        );
    }
}
