//! Trade sizing and DCA ladder calculation.
//!
//! The position is sized backwards from the loss budget: the trade amount is
//! chosen so that a stop-loss hit realizes exactly `risk_percentage` of the
//! available balance, assuming the whole ladder has filled by then. The stop
//! itself is anchored to the initial entry, not the post-fill average, so the
//! realized loss drifts from the budget as more levels fill before the stop
//! triggers. That approximation matches the behavior order placement was
//! built around and is kept as-is.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::models::{BotConfiguration, MarketType, OrderType, TradeDirection};

/// Price step per DCA level, percent. Fixed, independent of the configured
/// stop distance: with a stop tighter than `2% x dca_levels` the deeper
/// levels sit past the stop price.
pub const DCA_LEVEL_STEP_PCT: Decimal = dec!(2);

const ONE_HUNDRED: Decimal = dec!(100);

/// Inputs for one ladder computation. Rebuilt on every change to the pair,
/// price, stop distance, order type, or balance; never cached.
#[derive(Debug, Clone)]
pub struct LadderRequest {
    /// Live market price
    pub current_price: Decimal,

    /// Stop-loss distance from entry, percent
    pub loss_pct_from_entry: Decimal,

    /// Position direction
    pub direction: TradeDirection,

    /// Market or limit entry
    pub order_type: OrderType,

    /// Limit price; used as the effective entry for limit orders
    pub limit_price: Option<Decimal>,

    /// Balance available to the trade, in quote currency
    pub available_balance: Decimal,
}

/// One averaging-down entry level.
#[derive(Debug, Clone, PartialEq)]
pub struct DcaLevel {
    /// Level index, 1-based
    pub level: u32,

    /// Distance from entry, percent
    pub percentage: Decimal,

    /// Quote amount placed at this level
    pub amount: Decimal,

    /// Price this level's order sits at
    pub target_price: Decimal,

    /// Total invested through this level, initial order included
    pub cumulative_amount: Decimal,

    /// Average entry price after this level fills
    pub average_entry: Decimal,
}

/// A fully computed trade ladder. Ephemeral: consumed immediately by the
/// validator and the order-placement surface, never persisted.
#[derive(Debug, Clone)]
pub struct TradeLadder {
    /// Loss realized if the stop is hit with the full ladder filled
    pub max_loss_amount: Decimal,

    /// Total quote amount committed across initial order and all levels
    pub total_trade_amount: Decimal,

    /// Quote amount of the first entry
    pub initial_order_amount: Decimal,

    /// Quote amount held back for the DCA levels
    pub dca_reserved_amount: Decimal,

    /// Notional exposure after leverage (equals total for spot)
    pub leveraged_amount: Decimal,

    /// Effective entry the ladder is anchored to
    pub entry_price: Decimal,

    /// Stop-loss price
    pub stop_loss_price: Decimal,

    /// Take-profit price
    pub take_profit_price: Decimal,

    /// Averaging-down levels, ascending by level
    pub levels: Vec<DcaLevel>,
}

/// Compute the position size and DCA ladder for a trade.
///
/// Returns `None` when there is nothing to size: non-positive balance,
/// price, or stop distance. The caller surfaces a "no balance" notice
/// separately; this is not an error.
pub fn compute_ladder(request: &LadderRequest, config: &BotConfiguration) -> Option<TradeLadder> {
    if request.available_balance <= Decimal::ZERO
        || request.current_price <= Decimal::ZERO
        || request.loss_pct_from_entry <= Decimal::ZERO
    {
        return None;
    }

    let max_loss_amount = request.available_balance * config.risk_percentage / ONE_HUNDRED;

    // Limit orders anchor the ladder at the limit price, not the live price.
    let entry_price = match (request.order_type, request.limit_price) {
        (OrderType::Limit, Some(limit)) if limit > Decimal::ZERO => limit,
        _ => request.current_price,
    };

    let loss_fraction = request.loss_pct_from_entry / ONE_HUNDRED;
    let stop_loss_price = match request.direction {
        TradeDirection::Long => entry_price * (Decimal::ONE - loss_fraction),
        TradeDirection::Short => entry_price * (Decimal::ONE + loss_fraction),
    };

    let price_drop_percentage = ((entry_price - stop_loss_price) / entry_price).abs();
    if price_drop_percentage.is_zero() {
        warn!(
            entry = %entry_price,
            stop = %stop_loss_price,
            "Stop equals entry, refusing to size a zero-distance ladder"
        );
        return None;
    }

    // Central sizing step: lose exactly max_loss_amount at the stop,
    // assuming the full ladder is filled.
    let total_trade_amount = max_loss_amount / price_drop_percentage;

    let leveraged_amount = match config.market_type {
        MarketType::Futures => total_trade_amount * config.leverage,
        MarketType::Spot => total_trade_amount,
    };

    let initial_order_amount = total_trade_amount * config.initial_order_percentage / ONE_HUNDRED;
    let dca_reserved_amount = total_trade_amount - initial_order_amount;

    let tp_fraction = config.take_profit_percentage / ONE_HUNDRED;
    let take_profit_price = match request.direction {
        TradeDirection::Long => entry_price * (Decimal::ONE + tp_fraction),
        TradeDirection::Short => entry_price * (Decimal::ONE - tp_fraction),
    };

    let levels = build_levels(
        entry_price,
        initial_order_amount,
        dca_reserved_amount,
        config.dca_levels,
        request.direction,
    );

    debug!(
        total = %total_trade_amount,
        initial = %initial_order_amount,
        reserved = %dca_reserved_amount,
        stop = %stop_loss_price,
        levels = levels.len(),
        "Computed trade ladder"
    );

    Some(TradeLadder {
        max_loss_amount,
        total_trade_amount,
        initial_order_amount,
        dca_reserved_amount,
        leveraged_amount,
        entry_price,
        stop_loss_price,
        take_profit_price,
        levels,
    })
}

/// Build the averaging-down levels, tracking the running average entry.
/// The running totals are seeded with the initial order at the entry price.
fn build_levels(
    entry_price: Decimal,
    initial_order_amount: Decimal,
    dca_reserved_amount: Decimal,
    dca_levels: u32,
    direction: TradeDirection,
) -> Vec<DcaLevel> {
    if dca_levels == 0 {
        return Vec::new();
    }

    let per_level_amount = dca_reserved_amount / Decimal::from(dca_levels);
    let mut cumulative_investment = initial_order_amount;
    let mut cumulative_quantity = initial_order_amount / entry_price;
    let mut levels = Vec::with_capacity(dca_levels as usize);

    for level in 1..=dca_levels {
        let percentage = DCA_LEVEL_STEP_PCT * Decimal::from(level);
        let offset = percentage / ONE_HUNDRED;
        let target_price = match direction {
            TradeDirection::Long => entry_price * (Decimal::ONE - offset),
            TradeDirection::Short => entry_price * (Decimal::ONE + offset),
        };

        cumulative_investment += per_level_amount;
        cumulative_quantity += per_level_amount / target_price;

        levels.push(DcaLevel {
            level,
            percentage,
            amount: per_level_amount,
            target_price,
            cumulative_amount: cumulative_investment,
            average_entry: cumulative_investment / cumulative_quantity,
        });
    }

    levels
}
