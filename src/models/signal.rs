//! Trading signal model and direction mapping.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Long => "long",
            TradeDirection::Short => "short",
        }
    }
}

/// Signal classification emitted by the signal producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
    StrongBuy,
    StrongSell,
}

impl SignalType {
    /// Map a signal class to the position direction it implies.
    /// BUY variants open longs; everything else is treated as short.
    pub fn direction(&self) -> TradeDirection {
        match self {
            SignalType::Buy | SignalType::StrongBuy => TradeDirection::Long,
            _ => TradeDirection::Short,
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, SignalType::StrongBuy | SignalType::StrongSell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
            SignalType::Hold => "HOLD",
            SignalType::StrongBuy => "STRONG_BUY",
            SignalType::StrongSell => "STRONG_SELL",
        }
    }
}

/// Quote suffixes stripped when extracting the base asset from a symbol.
const QUOTE_SUFFIXES: &[&str] = &["USDT", "USDC", "FDUSD", "BUSD", "TUSD", "USD"];

/// A live trading signal. Read-only input; produced by an external
/// signal service and consumed here for sizing and eligibility decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Traded symbol, e.g. "BTCUSDT" or "SOL/USDC"
    pub symbol: String,

    /// Chart timeframe the signal was generated on, e.g. "1h"
    pub timeframe: String,

    /// Signal classification
    pub signal_type: SignalType,

    /// Producer confidence, 0-100
    pub confidence_score: f64,

    /// Suggested entry price
    pub entry_price: Decimal,

    /// Which producer emitted the signal, e.g. "ai", "tradingview"
    pub source: String,

    /// When the signal was emitted
    pub created_at: DateTime<Utc>,
}

impl Signal {
    /// Direction this signal trades in.
    pub fn direction(&self) -> TradeDirection {
        self.signal_type.direction()
    }

    /// Extract the base asset from the symbol by splitting on a separator
    /// or stripping a known quote suffix. "BTCUSDT" and "BTC/USDT" both
    /// yield "BTC"; unknown quotes leave the symbol untouched.
    pub fn base_asset(&self) -> String {
        let symbol = self.symbol.to_uppercase();
        if let Some((base, _)) = symbol.split_once(['/', '-']) {
            return base.to_string();
        }
        for quote in QUOTE_SUFFIXES {
            if let Some(base) = symbol.strip_suffix(quote) {
                if !base.is_empty() {
                    return base.to_string();
                }
            }
        }
        symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_signal(symbol: &str, signal_type: SignalType) -> Signal {
        Signal {
            symbol: symbol.to_string(),
            timeframe: "1h".to_string(),
            signal_type,
            confidence_score: 60.0,
            entry_price: dec!(100),
            source: "ai".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(SignalType::Buy.direction(), TradeDirection::Long);
        assert_eq!(SignalType::StrongBuy.direction(), TradeDirection::Long);
        assert_eq!(SignalType::Sell.direction(), TradeDirection::Short);
        assert_eq!(SignalType::StrongSell.direction(), TradeDirection::Short);
        assert_eq!(SignalType::Hold.direction(), TradeDirection::Short);
    }

    #[test]
    fn test_base_asset_extraction() {
        assert_eq!(make_signal("BTCUSDT", SignalType::Buy).base_asset(), "BTC");
        assert_eq!(make_signal("SOL/USDC", SignalType::Buy).base_asset(), "SOL");
        assert_eq!(make_signal("eth-usd", SignalType::Buy).base_asset(), "ETH");
        // Unknown quote: symbol passes through uppercased
        assert_eq!(make_signal("BTCEUR", SignalType::Buy).base_asset(), "BTCEUR");
    }

    #[test]
    fn test_signal_type_serde_format() {
        let json = serde_json::to_string(&SignalType::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG_BUY\"");
        let parsed: SignalType = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(parsed, SignalType::Sell);
    }
}
