//! The decision engine: risk constraints, ladder sizing, validation,
//! signal eligibility, and stop-loss suggestion.

mod constraints;
mod eligibility;
mod ladder;
mod smart_loss;
mod validator;

pub use constraints::{RiskProfileConstraints, DEFAULT_MAX_CONCURRENT_TRADES};
pub use eligibility::{check_signal, normalize_source, EligibilityDecision};
pub use ladder::{compute_ladder, DcaLevel, LadderRequest, TradeLadder, DCA_LEVEL_STEP_PCT};
pub use smart_loss::{
    classify_liquidity, suggest_loss, LiquidityTier, RiskBand, SmartLossSuggestion,
};
pub use validator::{validate, RiskLevel, TradeValidationResult};
