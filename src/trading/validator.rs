//! Advisory validation of a computed ladder against the risk profile.
//!
//! Findings never block order placement; they are surfaced as guidance next
//! to the order form. Every rule is evaluated independently and accumulated,
//! with the overall risk level taking the worst severity seen.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::constraints::RiskProfileConstraints;
use super::ladder::TradeLadder;

/// Severity of the validation outcome, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Warning => "warning",
            RiskLevel::Danger => "danger",
        }
    }
}

/// Outcome of validating a ladder. `valid` means no errors; warnings may
/// still be present.
#[derive(Debug, Clone)]
pub struct TradeValidationResult {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Check a computed ladder against the profile constraints and balance.
///
/// `current_open_trades` is optional; concurrency rules are skipped when the
/// caller does not know the open-trade count.
pub fn validate(
    ladder: &TradeLadder,
    available_balance: Decimal,
    constraints: &RiskProfileConstraints,
    current_open_trades: Option<u32>,
) -> TradeValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut risk_level = RiskLevel::Safe;

    if available_balance <= Decimal::ZERO {
        // The ladder preconditions normally rule this out, but the validator
        // is also callable standalone.
        errors.push("No available balance".to_string());
        return TradeValidationResult {
            valid: false,
            warnings,
            errors,
            risk_level: RiskLevel::Danger,
        };
    }

    let risk_ratio_pct = ladder.max_loss_amount / available_balance * dec!(100);
    if risk_ratio_pct > constraints.max_risk_per_trade * dec!(1.5) {
        errors.push(format!(
            "Risk per trade {:.2}% is far above the {:.2}% limit",
            risk_ratio_pct, constraints.max_risk_per_trade
        ));
        risk_level = RiskLevel::Danger;
    } else if risk_ratio_pct > constraints.max_risk_per_trade {
        warnings.push(format!(
            "Risk per trade {:.2}% exceeds the {:.2}% limit",
            risk_ratio_pct, constraints.max_risk_per_trade
        ));
        risk_level = risk_level.max(RiskLevel::Warning);
    }

    if ladder.levels.len() as u32 > constraints.max_dca_levels {
        errors.push(format!(
            "{} DCA levels exceed the maximum of {}",
            ladder.levels.len(),
            constraints.max_dca_levels
        ));
        risk_level = RiskLevel::Danger;
    }

    if ladder.total_trade_amount > available_balance * dec!(0.95) {
        warnings.push(format!(
            "Trade amount {:.2} uses over 95% of the available balance",
            ladder.total_trade_amount
        ));
        risk_level = risk_level.max(RiskLevel::Warning);
    }

    if let Some(open_trades) = current_open_trades {
        if open_trades >= constraints.max_concurrent_trades {
            errors.push(format!(
                "Concurrent trade limit reached: {} of {}",
                open_trades, constraints.max_concurrent_trades
            ));
            risk_level = RiskLevel::Danger;
        } else if open_trades as f64 >= 0.8 * constraints.max_concurrent_trades as f64 {
            warnings.push(format!(
                "Approaching concurrent trade limit: {} of {}",
                open_trades, constraints.max_concurrent_trades
            ));
            risk_level = risk_level.max(RiskLevel::Warning);
        }
    }

    if risk_ratio_pct > constraints.max_total_risk {
        warnings.push(format!(
            "Risk per trade {:.2}% exceeds the total risk budget of {:.2}%",
            risk_ratio_pct, constraints.max_total_risk
        ));
        risk_level = risk_level.max(RiskLevel::Warning);
    }

    debug!(
        risk_pct = risk_ratio_pct.to_f64().unwrap_or(0.0),
        warnings = warnings.len(),
        errors = errors.len(),
        level = risk_level.as_str(),
        "Validated trade ladder"
    );

    TradeValidationResult {
        valid: errors.is_empty(),
        warnings,
        errors,
        risk_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BotConfiguration, OrderType, TradeDirection};
    use crate::trading::ladder::{compute_ladder, LadderRequest};

    fn make_ladder(balance: Decimal, config: &BotConfiguration) -> TradeLadder {
        let request = LadderRequest {
            current_price: dec!(100),
            loss_pct_from_entry: dec!(5),
            direction: TradeDirection::Long,
            order_type: OrderType::Market,
            limit_price: None,
            available_balance: balance,
        };
        compute_ladder(&request, config).unwrap()
    }

    #[test]
    fn test_in_budget_trade_is_safe() {
        let config = BotConfiguration::default();
        let constraints = RiskProfileConstraints::from_config(&config);
        let ladder = make_ladder(dec!(1000), &config);

        let result = validate(&ladder, dec!(1000), &constraints, None);
        assert!(result.valid);
        assert!(result.warnings.is_empty());
        assert_eq!(result.risk_level, RiskLevel::Safe);
    }

    #[test]
    fn test_risk_above_limit_warns() {
        let config = BotConfiguration::default();
        let constraints = RiskProfileConstraints::from_config(&config);
        // Ladder sized on a larger balance than is actually available:
        // 2% of 1000 = 20 loss budget against a 700 balance is ~2.86%.
        let ladder = make_ladder(dec!(1000), &config);

        let result = validate(&ladder, dec!(700), &constraints, None);
        assert!(result.valid);
        assert_eq!(result.risk_level, RiskLevel::Warning);
        assert!(result.warnings.iter().any(|w| w.contains("exceeds")));
    }

    #[test]
    fn test_risk_far_above_limit_errors() {
        let config = BotConfiguration::default();
        let constraints = RiskProfileConstraints::from_config(&config);
        // 20 loss budget against 500 balance is 4%, past the 3% hard line.
        let ladder = make_ladder(dec!(1000), &config);

        let result = validate(&ladder, dec!(500), &constraints, None);
        assert!(!result.valid);
        assert_eq!(result.risk_level, RiskLevel::Danger);
    }

    #[test]
    fn test_too_many_dca_levels_errors() {
        let sizing_config = BotConfiguration {
            dca_levels: 6,
            ..Default::default()
        };
        // Profile allows fewer levels than the ladder carries.
        let constraints = RiskProfileConstraints::from_config(&BotConfiguration::default());
        let ladder = make_ladder(dec!(1000), &sizing_config);

        let result = validate(&ladder, dec!(1000), &constraints, None);
        assert!(!result.valid);
        assert_eq!(result.risk_level, RiskLevel::Danger);
        assert!(result.errors.iter().any(|e| e.contains("DCA levels")));
    }

    #[test]
    fn test_balance_overutilization_warns() {
        // 10% risk with a 5% stop sizes the trade at 2x the balance.
        let config = BotConfiguration {
            risk_percentage: dec!(10),
            ..Default::default()
        };
        let constraints = RiskProfileConstraints::from_config(&config);
        let ladder = make_ladder(dec!(1000), &config);

        let result = validate(&ladder, dec!(1000), &constraints, None);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("95% of the available balance")));
    }

    #[test]
    fn test_concurrent_trade_limits() {
        let config = BotConfiguration::default();
        let constraints = RiskProfileConstraints::from_config(&config);
        let ladder = make_ladder(dec!(1000), &config);

        // At the cap: error
        let result = validate(&ladder, dec!(1000), &constraints, Some(5));
        assert!(!result.valid);
        assert_eq!(result.risk_level, RiskLevel::Danger);

        // At 80% of the cap: warning
        let result = validate(&ladder, dec!(1000), &constraints, Some(4));
        assert!(result.valid);
        assert_eq!(result.risk_level, RiskLevel::Warning);

        // Below: clean
        let result = validate(&ladder, dec!(1000), &constraints, Some(2));
        assert_eq!(result.risk_level, RiskLevel::Safe);
    }

    #[test]
    fn test_zero_balance_is_danger() {
        let config = BotConfiguration::default();
        let constraints = RiskProfileConstraints::from_config(&config);
        let ladder = make_ladder(dec!(1000), &config);

        let result = validate(&ladder, Decimal::ZERO, &constraints, None);
        assert!(!result.valid);
        assert_eq!(result.risk_level, RiskLevel::Danger);
    }

    #[test]
    fn test_more_balance_never_raises_severity() {
        let config = BotConfiguration::default();
        let constraints = RiskProfileConstraints::from_config(&config);
        let ladder = make_ladder(dec!(1000), &config);

        let mut previous = RiskLevel::Danger;
        for balance in [dec!(100), dec!(500), dec!(700), dec!(1000), dec!(5000)] {
            let result = validate(&ladder, balance, &constraints, None);
            assert!(
                result.risk_level <= previous,
                "severity rose when balance grew to {}",
                balance
            );
            previous = result.risk_level;
        }
    }
}
