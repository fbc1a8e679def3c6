//! Synthetic bar generation for tests and demos.
//!
//! Seeded geometric random walk: the same seed always produces the same
//! series, so runs built on synthetic data stay reproducible.

use chrono::{Duration, NaiveDate};
use quantsim_core::domain::Bar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate `days` daily bars starting at `start`, following a geometric
/// random walk with the given daily drift and volatility.
pub fn random_walk_bars(
    symbol: &str,
    start: NaiveDate,
    days: usize,
    start_price: f64,
    drift: f64,
    volatility: f64,
    seed: u64,
) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bars = Vec::with_capacity(days);
    let mut close = start_price;

    for i in 0..days {
        let open = close;
        // Two uniform draws approximate a zero-mean shock well enough here.
        let shock: f64 = rng.gen_range(-1.0..1.0) + rng.gen_range(-1.0..1.0);
        close = (open * (1.0 + drift + volatility * shock)).max(0.01);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..volatility));
        let low = (open.min(close) * (1.0 - rng.gen_range(0.0..volatility))).max(0.01);

        bars.push(Bar {
            symbol: symbol.to_string(),
            date: start + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: rng.gen_range(500_000.0..2_000_000.0),
            amount: None,
        });
    }
    bars
}
