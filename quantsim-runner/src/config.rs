//! Serializable run configuration.
//!
//! A `RunConfig` captures everything a run needs besides data and strategy
//! code: starting cash, financing rates, broker frictions, risk limits, and
//! the optional allocator. Loads from TOML and validates on load.

use quantsim_core::engine::{AllocatorConfig, BacktestConfig, BrokerConfig, RiskConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse run config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("initial_cash must be positive, got {0}")]
    NonPositiveCash(f64),

    #[error("slippage_bps must be non-negative, got {0}")]
    NegativeSlippage(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub initial_cash: f64,
    #[serde(default)]
    pub daily_interest_rate: f64,
    #[serde(default)]
    pub daily_borrow_rate: f64,
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocator: Option<AllocatorConfig>,
}

impl RunConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_cash <= 0.0 {
            return Err(ConfigError::NonPositiveCash(self.initial_cash));
        }
        if self.broker.slippage_bps < 0.0 {
            return Err(ConfigError::NegativeSlippage(self.broker.slippage_bps));
        }
        Ok(())
    }

    /// The engine-facing configuration for this run.
    pub fn to_backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            initial_cash: self.initial_cash,
            daily_interest_rate: self.daily_interest_rate,
            daily_borrow_rate: self.daily_borrow_rate,
            broker: self.broker.clone(),
            risk: self.risk.clone(),
            allocator: self.allocator.clone(),
        }
    }
}
