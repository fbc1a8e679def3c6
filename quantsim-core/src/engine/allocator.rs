//! Weight allocator — desired portfolio weights to integer unit targets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// How a raw lot count is snapped to an integer number of lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    Nearest,
    Floor,
    Ceil,
}

impl Rounding {
    fn apply(self, lots: f64) -> i64 {
        match self {
            Rounding::Nearest => lots.round() as i64,
            Rounding::Floor => lots.floor() as i64,
            Rounding::Ceil => lots.ceil() as i64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Cap on the sum of absolute weights after scaling.
    pub max_leverage: f64,
    /// Minimum tradable increment in units.
    pub lot_size: i64,
    pub rounding: Rounding,
    pub allow_short: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_leverage: 1.0,
            lot_size: 1,
            rounding: Rounding::Floor,
            allow_short: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lot_size must be positive, got {0}")]
    NonPositiveLotSize(i64),

    #[error("max_leverage must be positive, got {0}")]
    NonPositiveLeverage(f64),
}

/// Converts desired symbol weights into unit targets given equity and prices.
#[derive(Debug, Clone)]
pub struct WeightAllocator {
    config: AllocatorConfig,
}

impl WeightAllocator {
    /// Bad sizing parameters are a programming error; fail before any
    /// simulation starts.
    pub fn new(config: AllocatorConfig) -> Result<Self, ConfigError> {
        if config.lot_size <= 0 {
            return Err(ConfigError::NonPositiveLotSize(config.lot_size));
        }
        if config.max_leverage <= 0.0 || !config.max_leverage.is_finite() {
            return Err(ConfigError::NonPositiveLeverage(config.max_leverage));
        }
        Ok(Self { config })
    }

    /// Weight set → integer unit targets.
    ///
    /// Zero for every symbol when equity is non-positive; negative weights
    /// dropped when shorting is disallowed; proportional de-leveraging when
    /// gross weight exceeds the cap (never re-normalized upward); symbols
    /// with missing or non-positive prices are skipped silently.
    pub fn weights_to_units(
        &self,
        weights: &BTreeMap<String, f64>,
        equity: f64,
        prices: &BTreeMap<String, f64>,
    ) -> BTreeMap<String, i64> {
        let mut units = BTreeMap::new();

        if equity <= 0.0 {
            for symbol in weights.keys() {
                units.insert(symbol.clone(), 0);
            }
            return units;
        }

        let kept: Vec<(&String, f64)> = weights
            .iter()
            .filter(|(_, w)| self.config.allow_short || **w >= 0.0)
            .map(|(s, w)| (s, *w))
            .collect();

        let total_abs: f64 = kept.iter().map(|(_, w)| w.abs()).sum();
        let scale = if total_abs > self.config.max_leverage {
            self.config.max_leverage / total_abs
        } else {
            1.0
        };

        let lot = self.config.lot_size;
        for (symbol, weight) in kept {
            let Some(price) = prices.get(symbol).copied().filter(|p| *p > 0.0) else {
                continue; // unpriced symbol: the order simply isn't placed
            };
            let target_value = equity * weight * scale;
            let raw_lots = target_value / price / lot as f64;
            units.insert(symbol.clone(), self.config.rounding.apply(raw_lots) * lot);
        }

        units
    }
}
