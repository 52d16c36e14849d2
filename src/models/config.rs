//! Per-user bot configuration: sizing and risk parameters.
//!
//! Upstream rows arrive as loosely-typed JSON records; `from_record` is the
//! single validated parse step that turns one into a `BotConfiguration`, so
//! the rest of the engine never touches raw records.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Market the position is sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Spot,
    Futures,
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Spot => "spot",
            MarketType::Futures => "futures",
        }
    }
}

/// How the initial entry order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

/// Errors from parsing or validating a configuration record.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("risk percentage must be in (0, 100], got {0}")]
    RiskPercentage(Decimal),

    #[error("initial order percentage must be in (0, 100], got {0}")]
    InitialOrderPercentage(Decimal),

    #[error("take profit percentage must be positive, got {0}")]
    TakeProfit(Decimal),

    #[error("leverage must be at least 1, got {0}")]
    Leverage(Decimal),
}

/// Per-user sizing and risk parameters, persisted upstream and mutated
/// through the settings surface. Absent fields fall back to the defaults
/// below at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfiguration {
    /// Total capital the user has committed to the bot, in quote currency
    #[serde(default = "default_total_capital", alias = "totalCapital")]
    pub total_capital: Decimal,

    /// Percentage of available balance risked per trade (0-100]
    #[serde(default = "default_risk_percentage", alias = "riskPercentage")]
    pub risk_percentage: Decimal,

    /// Percentage of the total trade amount placed as the first entry (0-100]
    #[serde(default = "default_initial_order_percentage", alias = "initialOrderPercentage")]
    pub initial_order_percentage: Decimal,

    /// Number of averaging-down levels below the entry
    #[serde(default = "default_dca_levels", alias = "dcaLevels")]
    pub dca_levels: u32,

    /// Take-profit distance from entry, percent
    #[serde(default = "default_take_profit_percentage", alias = "takeProfitPercentage")]
    pub take_profit_percentage: Decimal,

    /// Position leverage, 1 for spot
    #[serde(default = "default_leverage")]
    pub leverage: Decimal,

    /// Which market the sizing applies to
    #[serde(default = "default_market_type", alias = "marketType")]
    pub market_type: MarketType,
}

fn default_total_capital() -> Decimal {
    dec!(1000)
}

fn default_risk_percentage() -> Decimal {
    dec!(2)
}

fn default_initial_order_percentage() -> Decimal {
    dec!(40)
}

fn default_dca_levels() -> u32 {
    3
}

fn default_take_profit_percentage() -> Decimal {
    dec!(3)
}

fn default_leverage() -> Decimal {
    Decimal::ONE
}

fn default_market_type() -> MarketType {
    MarketType::Spot
}

impl Default for BotConfiguration {
    fn default() -> Self {
        Self {
            total_capital: default_total_capital(),
            risk_percentage: default_risk_percentage(),
            initial_order_percentage: default_initial_order_percentage(),
            dca_levels: default_dca_levels(),
            take_profit_percentage: default_take_profit_percentage(),
            leverage: default_leverage(),
            market_type: default_market_type(),
        }
    }
}

impl BotConfiguration {
    /// Parse a loosely-typed upstream record into a validated configuration.
    pub fn from_record(record: &serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(record.clone())?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.risk_percentage <= Decimal::ZERO || self.risk_percentage > dec!(100) {
            return Err(ConfigError::RiskPercentage(self.risk_percentage));
        }
        if self.initial_order_percentage <= Decimal::ZERO
            || self.initial_order_percentage > dec!(100)
        {
            return Err(ConfigError::InitialOrderPercentage(
                self.initial_order_percentage,
            ));
        }
        if self.take_profit_percentage <= Decimal::ZERO {
            return Err(ConfigError::TakeProfit(self.take_profit_percentage));
        }
        if self.leverage < Decimal::ONE {
            return Err(ConfigError::Leverage(self.leverage));
        }
        Ok(())
    }
}
