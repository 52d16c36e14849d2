//! Data models for bot configuration, signals, and auto-trading settings.

mod config;
mod settings;
mod signal;

pub use config::{BotConfiguration, ConfigError, MarketType, OrderType};
pub use settings::{AutoTradingSettings, TradingMode};
pub use signal::{Signal, SignalType, TradeDirection};
