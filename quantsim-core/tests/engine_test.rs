//! End-to-end engine tests: full pipeline runs over hand-built bar data.

use chrono::NaiveDate;
use quantsim_core::domain::{Bar, Fill, Order, TimeInForce};
use quantsim_core::engine::{
    run_backtest_multi, AllocatorConfig, BacktestConfig, BrokerConfig, RiskConfig, Rounding,
    Signal, Strategy, TargetIntent, TradeLedger, WeightAllocator,
};
use std::collections::BTreeMap;

fn bar(symbol: &str, day: u32, open: f64, close: f64, volume: f64) -> Bar {
    Bar {
        symbol: symbol.into(),
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume,
        amount: None,
    }
}

struct OrdersOnce(Vec<Order>);

impl Strategy for OrdersOnce {
    fn on_bar(&mut self, _bar: &Bar) -> Signal {
        if self.0.is_empty() {
            Signal::Hold
        } else {
            Signal::Orders(std::mem::take(&mut self.0))
        }
    }
}

/// Flat position, market buy of 100 units on a $10 open with no
/// frictions → exactly one fill at 10.0 and cash down by exactly 1000.
#[test]
fn frictionless_market_buy() {
    let mut data = BTreeMap::new();
    data.insert("SPY".to_string(), vec![bar("SPY", 2, 10.0, 10.0, 1e6)]);

    let mut strategies: BTreeMap<String, Box<dyn Strategy>> = BTreeMap::new();
    strategies.insert(
        "SPY".to_string(),
        Box::new(OrdersOnce(vec![Order::market("SPY", 100)])),
    );

    let config = BacktestConfig {
        initial_cash: 10_000.0,
        ..BacktestConfig::default()
    };
    let output = run_backtest_multi(&data, &mut strategies, &config).unwrap();

    assert_eq!(output.fills.len(), 1);
    let fill = &output.fills[0];
    assert_eq!(fill.qty, 100);
    assert_eq!(fill.price, 10.0);
    assert_eq!(fill.commission, 0.0);
    assert_eq!(output.portfolio.cash, 9_000.0);
}

/// Long 100 @ 10, sell 150 @ 12: one LONG trade of 100 units
/// with +200 PnL and a fresh short of 50 @ 12 left open in the ledger.
#[test]
fn overshooting_sell_closes_then_flips() {
    let mut ledger = TradeLedger::new();
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    ledger.on_fill(&Fill {
        date,
        symbol: "SPY".into(),
        qty: 100,
        price: 10.0,
        commission: 0.0,
    });
    ledger.on_fill(&Fill {
        date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
        symbol: "SPY".into(),
        qty: -150,
        price: 12.0,
        commission: 0.0,
    });

    assert_eq!(ledger.trades().len(), 1);
    let trade = &ledger.trades()[0];
    assert_eq!(trade.qty, 100);
    assert!((trade.pnl - 200.0).abs() < 1e-9);
    assert_eq!(ledger.open_units("SPY"), -50);
    assert_eq!(ledger.open_entry_price("SPY"), Some(12.0));
}

/// Two full weights against a 1.0 leverage cap halve to 0.5
/// each; resulting gross exposure stays within one lot of equity.
#[test]
fn leverage_cap_halves_equal_weights() {
    let allocator = WeightAllocator::new(AllocatorConfig {
        max_leverage: 1.0,
        lot_size: 1,
        rounding: Rounding::Floor,
        allow_short: true,
    })
    .unwrap();

    let weights: BTreeMap<String, f64> =
        [("A".to_string(), 1.0), ("B".to_string(), 1.0)].into();
    let prices: BTreeMap<String, f64> =
        [("A".to_string(), 100.0), ("B".to_string(), 100.0)].into();

    let units = allocator.weights_to_units(&weights, 100_000.0, &prices);
    assert_eq!(units["A"], 500);
    assert_eq!(units["B"], 500);

    let gross: f64 = units
        .iter()
        .map(|(sym, u)| u.abs() as f64 * prices[sym])
        .sum();
    assert!((gross - 100_000.0).abs() <= 100.0);
}

/// A GTC order for 10 units against a 4-unit volume cap fills 4
/// on day one and carries remaining=6 into the next day's book.
#[test]
fn gtc_partial_fill_carries_over() {
    let mut data = BTreeMap::new();
    data.insert(
        "SPY".to_string(),
        vec![bar("SPY", 2, 10.0, 10.0, 1e6), bar("SPY", 3, 10.0, 10.0, 1e6)],
    );

    let mut strategies: BTreeMap<String, Box<dyn Strategy>> = BTreeMap::new();
    strategies.insert(
        "SPY".to_string(),
        Box::new(OrdersOnce(vec![
            Order::market("SPY", 10).with_tif(TimeInForce::Gtc),
        ])),
    );

    let config = BacktestConfig {
        initial_cash: 10_000.0,
        broker: BrokerConfig {
            volume_limit: 0.000004,
            ..BrokerConfig::default()
        },
        ..BacktestConfig::default()
    };
    let output = run_backtest_multi(&data, &mut strategies, &config).unwrap();

    assert_eq!(output.fills.len(), 2);
    assert_eq!(output.fills[0].qty, 4);
    assert_eq!(
        output.fills[0].date,
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    );
    assert_eq!(output.fills[1].qty, 6);
    assert_eq!(
        output.fills[1].date,
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    );
    assert_eq!(output.portfolio.position("SPY"), 10);
}

/// IOC never gets a second attempt: an untriggered IOC limit order leaves
/// no trace in the book and never fills on later days.
#[test]
fn ioc_unfilled_disappears() {
    let mut data = BTreeMap::new();
    data.insert(
        "SPY".to_string(),
        vec![
            bar("SPY", 2, 10.0, 10.0, 1e6),
            bar("SPY", 3, 5.0, 5.0, 1e6), // limit would be reachable now
        ],
    );

    let mut strategies: BTreeMap<String, Box<dyn Strategy>> = BTreeMap::new();
    strategies.insert(
        "SPY".to_string(),
        Box::new(OrdersOnce(vec![
            Order::limit("SPY", 100, 6.0).with_tif(TimeInForce::Ioc),
        ])),
    );

    let config = BacktestConfig {
        initial_cash: 10_000.0,
        ..BacktestConfig::default()
    };
    let output = run_backtest_multi(&data, &mut strategies, &config).unwrap();
    assert!(output.fills.is_empty());
}

/// Two symbols trading on interleaved calendars: the merged timeline keeps
/// both portfolios' marks consistent and the run deterministic.
#[test]
fn multi_symbol_sparse_calendars() {
    let mut data = BTreeMap::new();
    data.insert(
        "AAA".to_string(),
        vec![
            bar("AAA", 2, 10.0, 10.0, 1e6),
            bar("AAA", 3, 10.0, 12.0, 1e6),
            bar("AAA", 4, 12.0, 12.0, 1e6),
        ],
    );
    data.insert(
        "BBB".to_string(),
        vec![bar("BBB", 2, 20.0, 20.0, 1e6), bar("BBB", 4, 20.0, 18.0, 1e6)],
    );

    let mut strategies: BTreeMap<String, Box<dyn Strategy>> = BTreeMap::new();
    strategies.insert(
        "AAA".to_string(),
        Box::new(OrdersOnce(vec![Order::market("AAA", 100)])),
    );
    strategies.insert(
        "BBB".to_string(),
        Box::new(OrdersOnce(vec![Order::market("BBB", -50)])),
    );

    let config = BacktestConfig {
        initial_cash: 100_000.0,
        ..BacktestConfig::default()
    };
    let output = run_backtest_multi(&data, &mut strategies, &config).unwrap();

    assert_eq!(output.portfolio.position("AAA"), 100);
    assert_eq!(output.portfolio.position("BBB"), -50);
    assert_eq!(output.equity_curve.len(), 3);

    // Day 4: cash 100_000 (buy -1_000, short sale +1_000), AAA worth
    // 100 * 12 = 1_200, BBB short worth -50 * 18 = -900.
    let last = output.equity_curve.last().unwrap();
    assert!((last.equity - 100_300.0).abs() < 1e-9);

    // Determinism: the same inputs give an identical run.
    let mut strategies2: BTreeMap<String, Box<dyn Strategy>> = BTreeMap::new();
    strategies2.insert(
        "AAA".to_string(),
        Box::new(OrdersOnce(vec![Order::market("AAA", 100)])),
    );
    strategies2.insert(
        "BBB".to_string(),
        Box::new(OrdersOnce(vec![Order::market("BBB", -50)])),
    );
    let output2 = run_backtest_multi(&data, &mut strategies2, &config).unwrap();
    assert_eq!(output.fills, output2.fills);
    assert_eq!(output.equity_curve, output2.equity_curve);
}

/// Weight targets routed through the allocator rebalance to the cap.
#[test]
fn weight_targets_allocate_and_rebalance() {
    struct AlwaysWeight(f64);
    impl Strategy for AlwaysWeight {
        fn on_bar(&mut self, _bar: &Bar) -> Signal {
            Signal::Target(TargetIntent::Weight(self.0))
        }
    }

    let mut data = BTreeMap::new();
    data.insert(
        "SPY".to_string(),
        vec![bar("SPY", 2, 100.0, 100.0, 1e6), bar("SPY", 3, 100.0, 100.0, 1e6)],
    );

    let mut strategies: BTreeMap<String, Box<dyn Strategy>> = BTreeMap::new();
    strategies.insert("SPY".to_string(), Box::new(AlwaysWeight(0.5)));

    let config = BacktestConfig {
        initial_cash: 100_000.0,
        allocator: Some(AllocatorConfig {
            max_leverage: 1.0,
            lot_size: 1,
            rounding: Rounding::Floor,
            allow_short: true,
        }),
        ..BacktestConfig::default()
    };
    let output = run_backtest_multi(&data, &mut strategies, &config).unwrap();

    // Day one buys 500; day two equity and price are unchanged, so the
    // target is already met and nothing more trades.
    assert_eq!(output.fills.len(), 1);
    assert_eq!(output.portfolio.position("SPY"), 500);
}

/// Strategy risk clamp plus protective stop working together over a decline.
#[test]
fn clamp_and_stop_interact() {
    let mut data = BTreeMap::new();
    data.insert(
        "SPY".to_string(),
        vec![
            bar("SPY", 2, 100.0, 100.0, 1e6),
            bar("SPY", 3, 80.0, 80.0, 1e6), // gaps down through the stop
            bar("SPY", 4, 80.0, 80.0, 1e6),
        ],
    );

    struct WantLots(bool);
    impl Strategy for WantLots {
        fn on_bar(&mut self, _bar: &Bar) -> Signal {
            if self.0 {
                Signal::Hold
            } else {
                self.0 = true;
                Signal::Target(TargetIntent::Units(10_000))
            }
        }
    }

    let mut strategies: BTreeMap<String, Box<dyn Strategy>> = BTreeMap::new();
    strategies.insert("SPY".to_string(), Box::new(WantLots(false)));

    let config = BacktestConfig {
        initial_cash: 100_000.0,
        risk: RiskConfig {
            max_units_per_symbol: 200,
            stop_loss_pct: 0.1,
        },
        ..BacktestConfig::default()
    };
    let output = run_backtest_multi(&data, &mut strategies, &config).unwrap();

    // Clamped entry of 200 on day 2; the 20% gap down trips the stop, which
    // fills the close at day 3's open of 80.
    assert_eq!(output.fills[0].qty, 200);
    assert_eq!(output.portfolio.position("SPY"), 0);
    assert_eq!(output.trades.len(), 1);
    assert!((output.trades[0].pnl - (-4_000.0)).abs() < 1e-9);
}
