//! Auto-trading settings: the user's gate on automated execution.

use serde::{Deserialize, Serialize};

use super::TradeDirection;

/// Operating mode for automated trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingMode {
    Off,
    FullAuto,
    SemiAuto,
}

impl TradingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingMode::Off => "off",
            TradingMode::FullAuto => "full_auto",
            TradingMode::SemiAuto => "semi_auto",
        }
    }
}

/// Per-user auto-trading settings, persisted upstream.
///
/// `max_auto_trades_per_day` and `max_concurrent_auto_positions` are carried
/// for the trade-execution service; the eligibility filter does not enforce
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoTradingSettings {
    /// Master switch for automated trading
    pub enabled: bool,

    /// Operating mode; `off` disables automation even when `enabled` is set
    pub mode: TradingMode,

    /// Signal sources allowed to trigger trades; empty allows all
    #[serde(default)]
    pub allowed_signal_sources: Vec<String>,

    /// Directions allowed to trade automatically; empty allows both
    #[serde(default)]
    pub allowed_directions: Vec<TradeDirection>,

    /// Minimum signal confidence (0-100) required to act
    #[serde(default)]
    pub min_signal_confidence: Option<f64>,

    /// Daily cap on automated trades (enforced by the execution service)
    #[serde(default)]
    pub max_auto_trades_per_day: Option<u32>,

    /// Cap on concurrently open automated positions (enforced by the
    /// execution service)
    #[serde(default)]
    pub max_concurrent_auto_positions: Option<u32>,
}

impl Default for AutoTradingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: TradingMode::Off,
            allowed_signal_sources: Vec::new(),
            allowed_directions: Vec::new(),
            min_signal_confidence: None,
            max_auto_trades_per_day: None,
            max_concurrent_auto_positions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_format() {
        let json = serde_json::to_string(&TradingMode::FullAuto).unwrap();
        assert_eq!(json, "\"full_auto\"");
    }

    #[test]
    fn test_optional_fields_default() {
        let settings: AutoTradingSettings =
            serde_json::from_str(r#"{"enabled": true, "mode": "semi_auto"}"#).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.mode, TradingMode::SemiAuto);
        assert!(settings.allowed_signal_sources.is_empty());
        assert!(settings.min_signal_confidence.is_none());
    }
}
