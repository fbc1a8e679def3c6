//! Strategy signal contract.
//!
//! A strategy is a single-method contract: given a bar, return a signal.
//! Strategies hold indicator state only — portfolio truth (cash, positions)
//! lives in the engine, and the trait signature keeps it that way.

use crate::domain::{Bar, Order};

/// Desired end-of-signal position, as absolute units or a portfolio weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetIntent {
    /// Absolute signed unit target for the symbol.
    Units(i64),
    /// Fraction of total equity (negative = short); converted to units by
    /// the weight allocator.
    Weight(f64),
}

/// What a strategy wants done after seeing a bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// No opinion today.
    Hold,
    /// Target position, resolved against the current position by the engine.
    Target(TargetIntent),
    /// Raw orders, submitted to the book as-is.
    Orders(Vec<Order>),
}

pub trait Strategy {
    fn on_bar(&mut self, bar: &Bar) -> Signal;
}
