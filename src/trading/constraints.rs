//! Hard risk limits derived from a user's bot configuration.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::BotConfiguration;

/// Concurrent-trade cap applied to every profile; not user-configurable.
pub const DEFAULT_MAX_CONCURRENT_TRADES: u32 = 5;

/// Hard limits the validator checks a computed ladder against.
///
/// This is a view over `BotConfiguration`, recomputed whenever the
/// configuration changes; it is never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskProfileConstraints {
    /// Maximum percent of balance risked on a single trade
    pub max_risk_per_trade: Decimal,

    /// Maximum number of DCA levels per ladder
    pub max_dca_levels: u32,

    /// Maximum allowed leverage
    pub max_leverage: Decimal,

    /// Maximum number of concurrently open trades
    pub max_concurrent_trades: u32,

    /// Worst-case percent of balance at risk with every slot filled
    pub max_total_risk: Decimal,
}

impl RiskProfileConstraints {
    /// Derive the constraint set from a validated configuration.
    pub fn from_config(config: &BotConfiguration) -> Self {
        let max_concurrent_trades = DEFAULT_MAX_CONCURRENT_TRADES;
        Self {
            max_risk_per_trade: config.risk_percentage,
            max_dca_levels: config.dca_levels,
            max_leverage: config.leverage,
            max_concurrent_trades,
            max_total_risk: config.risk_percentage * Decimal::from(max_concurrent_trades),
        }
    }
}
