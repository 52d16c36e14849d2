//! Signal eligibility filter: whether automation may act on a signal.
//!
//! Checks short-circuit, so a decision carries at most one reason. Daily and
//! concurrent auto-trade caps are enforced downstream by the execution
//! service, not here.

use tracing::debug;

use crate::models::{AutoTradingSettings, Signal, TradeDirection, TradingMode};

/// Outcome of the eligibility check.
#[derive(Debug, Clone)]
pub struct EligibilityDecision {
    pub is_eligible: bool,
    pub reasons: Vec<String>,
}

impl EligibilityDecision {
    fn eligible() -> Self {
        Self {
            is_eligible: true,
            reasons: Vec::new(),
        }
    }

    fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            is_eligible: false,
            reasons: vec![reason.into()],
        }
    }
}

/// Normalize a producer's source string to its canonical settings key.
/// Unknown producers collapse to "legacy".
pub fn normalize_source(source: &str) -> &'static str {
    match source {
        "ai" => "ai_ultra",
        "realtime_ai" => "ai_realtime",
        "tradingview" => "tradingview",
        _ => "legacy",
    }
}

/// Decide whether an automated trade is permitted for this signal.
pub fn check_signal(signal: &Signal, settings: &AutoTradingSettings) -> EligibilityDecision {
    if !settings.enabled || settings.mode == TradingMode::Off {
        return EligibilityDecision::ineligible("Auto trading is disabled");
    }

    if !settings.allowed_signal_sources.is_empty() {
        let source = normalize_source(&signal.source);
        if !settings
            .allowed_signal_sources
            .iter()
            .any(|allowed| allowed == source)
        {
            return EligibilityDecision::ineligible(format!(
                "Signal source '{}' is not allowed",
                source
            ));
        }
    }

    if !settings.allowed_directions.is_empty() {
        let direction = signal.direction();
        if !settings.allowed_directions.contains(&direction) {
            let label = match direction {
                TradeDirection::Long => "LONG",
                TradeDirection::Short => "SHORT",
            };
            return EligibilityDecision::ineligible(format!("{} trades not allowed", label));
        }
    }

    if let Some(min_confidence) = settings.min_signal_confidence {
        if signal.confidence_score < min_confidence {
            return EligibilityDecision::ineligible(format!(
                "Signal confidence {:.0}% below minimum {:.0}%",
                signal.confidence_score, min_confidence
            ));
        }
    }

    debug!(
        symbol = %signal.symbol,
        source = %signal.source,
        confidence = signal.confidence_score,
        "Signal eligible for auto trading"
    );
    EligibilityDecision::eligible()
}
