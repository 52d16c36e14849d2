//! Heuristic stop-loss suggestion from liquidity tier and signal quality.
//!
//! Advisory input to the ladder calculator; the user is free to override it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::models::Signal;

/// Coarse liquidity classification of a base asset, used as a proxy for
/// expected volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityTier {
    High,
    Medium,
    Low,
}

impl LiquidityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidityTier::High => "high",
            LiquidityTier::Medium => "medium",
            LiquidityTier::Low => "low",
        }
    }

    /// Base suggested-loss percentage for the tier.
    fn base_loss_pct(&self) -> Decimal {
        match self {
            LiquidityTier::High => dec!(2.0),
            LiquidityTier::Medium => dec!(3.5),
            LiquidityTier::Low => dec!(5.5),
        }
    }
}

/// Risk classification of the final suggested percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Medium => "MEDIUM",
            RiskBand::High => "HIGH",
        }
    }
}

/// Bounds the suggestion is clamped to, percent.
const MIN_LOSS_PCT: Decimal = dec!(1.5);
const MAX_LOSS_PCT: Decimal = dec!(8.0);

const HIGH_LIQUIDITY: &[&str] = &["BTC", "ETH", "BNB", "SOL", "XRP", "ADA", "DOGE"];
const MEDIUM_LIQUIDITY: &[&str] = &[
    "AVAX", "DOT", "LINK", "MATIC", "LTC", "ATOM", "UNI", "NEAR", "ARB", "OP",
];

/// A suggested stop-loss for a signal.
#[derive(Debug, Clone)]
pub struct SmartLossSuggestion {
    /// Suggested stop distance from entry, percent, within [1.5, 8.0]
    pub suggested_loss_pct: Decimal,

    /// Liquidity tier the symbol was classified into
    pub liquidity_tier: LiquidityTier,

    /// Risk classification of the final percentage
    pub risk_band: RiskBand,

    /// Loss budget this suggestion implies: balance x risk% / 100
    pub estimated_max_loss: Decimal,
}

/// Classify a base asset into a liquidity tier.
pub fn classify_liquidity(base_asset: &str) -> LiquidityTier {
    if HIGH_LIQUIDITY.contains(&base_asset) {
        LiquidityTier::High
    } else if MEDIUM_LIQUIDITY.contains(&base_asset) {
        LiquidityTier::Medium
    } else {
        LiquidityTier::Low
    }
}

/// Propose a stop-loss percentage for a signal.
///
/// Returns `None` when there is no signal or no balance to trade with.
pub fn suggest_loss(
    signal: Option<&Signal>,
    risk_percentage: Decimal,
    available_balance: Decimal,
) -> Option<SmartLossSuggestion> {
    let signal = signal?;
    if available_balance <= Decimal::ZERO {
        return None;
    }

    let tier = classify_liquidity(&signal.base_asset());
    let mut loss_pct = tier.base_loss_pct();

    // High-confidence signals tolerate a tighter stop; weak ones get room.
    if signal.confidence_score >= 80.0 {
        loss_pct *= dec!(0.8);
    } else if signal.confidence_score <= 40.0 {
        loss_pct *= dec!(1.3);
    }

    if signal.signal_type.is_strong() {
        loss_pct *= dec!(0.9);
    }

    let loss_pct = loss_pct.clamp(MIN_LOSS_PCT, MAX_LOSS_PCT);

    let risk_band = if loss_pct <= dec!(2.5) {
        RiskBand::Low
    } else if loss_pct <= dec!(4.5) {
        RiskBand::Medium
    } else {
        RiskBand::High
    };

    debug!(
        symbol = %signal.symbol,
        tier = tier.as_str(),
        loss_pct = %loss_pct,
        band = risk_band.as_str(),
        "Suggested stop-loss"
    );

    Some(SmartLossSuggestion {
        suggested_loss_pct: loss_pct,
        liquidity_tier: tier,
        risk_band,
        estimated_max_loss: available_balance * risk_percentage / dec!(100),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignalType;
    use chrono::Utc;

    fn make_signal(symbol: &str, signal_type: SignalType, confidence: f64) -> Signal {
        Signal {
            symbol: symbol.to_string(),
            timeframe: "4h".to_string(),
            signal_type,
            confidence_score: confidence,
            entry_price: dec!(100),
            source: "ai".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_tier_classification() {
        assert_eq!(classify_liquidity("BTC"), LiquidityTier::High);
        assert_eq!(classify_liquidity("LINK"), LiquidityTier::Medium);
        assert_eq!(classify_liquidity("PEPE"), LiquidityTier::Low);
    }

    #[test]
    fn test_high_tier_neutral_confidence() {
        let signal = make_signal("BTCUSDT", SignalType::Buy, 60.0);
        let suggestion = suggest_loss(Some(&signal), dec!(2), dec!(1000)).unwrap();
        assert_eq!(suggestion.suggested_loss_pct, dec!(2.0));
        assert_eq!(suggestion.liquidity_tier, LiquidityTier::High);
        assert_eq!(suggestion.risk_band, RiskBand::Low);
        assert_eq!(suggestion.estimated_max_loss, dec!(20));
    }

    #[test]
    fn test_confidence_adjustments() {
        // High confidence tightens: 3.5 * 0.8 = 2.8
        let signal = make_signal("LINKUSDT", SignalType::Buy, 85.0);
        let suggestion = suggest_loss(Some(&signal), dec!(2), dec!(1000)).unwrap();
        assert_eq!(suggestion.suggested_loss_pct, dec!(2.80));
        assert_eq!(suggestion.risk_band, RiskBand::Medium);

        // Low confidence widens: 3.5 * 1.3 = 4.55
        let signal = make_signal("LINKUSDT", SignalType::Buy, 35.0);
        let suggestion = suggest_loss(Some(&signal), dec!(2), dec!(1000)).unwrap();
        assert_eq!(suggestion.suggested_loss_pct, dec!(4.55));
        assert_eq!(suggestion.risk_band, RiskBand::High);
    }

    #[test]
    fn test_strong_signal_tightens() {
        // 2.0 * 0.8 * 0.9 = 1.44, clamped up to 1.5
        let signal = make_signal("BTCUSDT", SignalType::StrongBuy, 90.0);
        let suggestion = suggest_loss(Some(&signal), dec!(2), dec!(1000)).unwrap();
        assert_eq!(suggestion.suggested_loss_pct, dec!(1.5));
    }

    #[test]
    fn test_clamp_bounds_hold_everywhere() {
        let symbols = ["BTCUSDT", "LINKUSDT", "PEPEUSDT"];
        let confidences = [0.0, 40.0, 60.0, 80.0, 100.0];
        let types = [SignalType::Buy, SignalType::StrongSell];

        for symbol in symbols {
            for confidence in confidences {
                for signal_type in types {
                    let signal = make_signal(symbol, signal_type, confidence);
                    let suggestion = suggest_loss(Some(&signal), dec!(2), dec!(1000)).unwrap();
                    assert!(suggestion.suggested_loss_pct >= dec!(1.5));
                    assert!(suggestion.suggested_loss_pct <= dec!(8.0));
                }
            }
        }
    }

    #[test]
    fn test_low_tier_weak_signal_caps_near_top() {
        // 5.5 * 1.3 = 7.15, inside the cap
        let signal = make_signal("PEPEUSDT", SignalType::Buy, 20.0);
        let suggestion = suggest_loss(Some(&signal), dec!(2), dec!(1000)).unwrap();
        assert_eq!(suggestion.suggested_loss_pct, dec!(7.15));
        assert_eq!(suggestion.risk_band, RiskBand::High);
    }

    #[test]
    fn test_missing_inputs_return_none() {
        assert!(suggest_loss(None, dec!(2), dec!(1000)).is_none());
        let signal = make_signal("BTCUSDT", SignalType::Buy, 60.0);
        assert!(suggest_loss(Some(&signal), dec!(2), Decimal::ZERO).is_none());
        assert!(suggest_loss(Some(&signal), dec!(2), dec!(-5)).is_none());
    }
}
