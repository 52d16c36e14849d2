//! Risk-aware trade sizing CLI.
//!
//! Computes DCA ladders from a loss budget, validates them against the
//! user's risk profile, gates signals for auto trading, and suggests
//! stop-loss distances. The engine itself is pure; this binary only wires
//! files and flags into it.

mod models;
mod trading;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::models::{
    AutoTradingSettings, BotConfiguration, OrderType, Signal, TradeDirection,
};
use crate::trading::{
    check_signal, compute_ladder, suggest_loss, validate, LadderRequest, RiskProfileConstraints,
};

/// Trade sizing and auto-trading eligibility CLI.
#[derive(Parser)]
#[command(name = "riskladder")]
#[command(about = "Size DCA ladders from a loss budget and gate auto-trade signals", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and validate a DCA ladder
    Ladder {
        /// Current market price
        #[arg(short, long)]
        entry: f64,

        /// Stop-loss distance from entry in percent; taken from the
        /// smart-loss suggestion when omitted and a signal file is given
        #[arg(long)]
        loss_pct: Option<f64>,

        /// Available balance in quote currency
        #[arg(short, long)]
        balance: f64,

        /// Position direction (long, short)
        #[arg(short, long, default_value = "long")]
        direction: String,

        /// Limit price; switches the entry to a limit order
        #[arg(long)]
        limit_price: Option<f64>,

        /// Bot configuration JSON file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Signal JSON file, used for the smart-loss suggestion
        #[arg(short, long)]
        signal: Option<PathBuf>,

        /// Currently open trade count, enables concurrency checks
        #[arg(long)]
        open_trades: Option<u32>,
    },

    /// Suggest a stop-loss percentage for a signal
    SuggestLoss {
        /// Signal JSON file
        #[arg(short, long)]
        signal: PathBuf,

        /// Available balance in quote currency
        #[arg(short, long)]
        balance: f64,

        /// Risk percentage for the loss-budget estimate
        #[arg(short, long, default_value = "2")]
        risk_pct: f64,
    },

    /// Check whether a signal is eligible for auto trading
    Eligibility {
        /// Signal JSON file
        #[arg(short, long)]
        signal: PathBuf,

        /// Auto-trading settings JSON file
        #[arg(long)]
        settings: PathBuf,
    },

    /// Show the effective configuration and derived risk constraints
    Config {
        /// Bot configuration JSON file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Ladder {
            entry,
            loss_pct,
            balance,
            direction,
            limit_price,
            config,
            signal,
            open_trades,
        } => {
            let config = load_config(config.as_deref())?;
            let signal = signal.as_deref().map(load_signal).transpose()?;
            let balance = Decimal::try_from(balance)?;

            let loss_pct = match loss_pct {
                Some(pct) => Decimal::try_from(pct)?,
                None => {
                    let suggestion =
                        suggest_loss(signal.as_ref(), config.risk_percentage, balance);
                    match suggestion {
                        Some(s) => {
                            info!(
                                loss_pct = %s.suggested_loss_pct,
                                tier = s.liquidity_tier.as_str(),
                                "Using smart-loss suggestion"
                            );
                            s.suggested_loss_pct
                        }
                        None => bail!("--loss-pct is required without a --signal file"),
                    }
                }
            };

            let direction = parse_direction(&direction)?;
            let limit_price = limit_price.map(Decimal::try_from).transpose()?;
            let request = LadderRequest {
                current_price: Decimal::try_from(entry)?,
                loss_pct_from_entry: loss_pct,
                direction,
                order_type: if limit_price.is_some() {
                    OrderType::Limit
                } else {
                    OrderType::Market
                },
                limit_price,
                available_balance: balance,
            };

            let Some(ladder) = compute_ladder(&request, &config) else {
                println!("Nothing to size: balance, price, and loss percent must be positive.");
                return Ok(());
            };

            println!("\n=== Trade Ladder ({}) ===", direction.as_str());
            println!("Entry price:       {:.4}", ladder.entry_price);
            println!("Stop loss:         {:.4}", ladder.stop_loss_price);
            println!("Take profit:       {:.4}", ladder.take_profit_price);
            println!("Max loss:          ${:.2}", ladder.max_loss_amount);
            println!("Total amount:      ${:.2}", ladder.total_trade_amount);
            println!("Initial order:     ${:.2}", ladder.initial_order_amount);
            println!("DCA reserved:      ${:.2}", ladder.dca_reserved_amount);
            println!("Leveraged amount:  ${:.2}", ladder.leveraged_amount);

            if !ladder.levels.is_empty() {
                println!(
                    "\n{:<6} {:>8} {:>12} {:>12} {:>12} {:>12}",
                    "LEVEL", "DROP%", "PRICE", "AMOUNT", "CUMULATIVE", "AVG ENTRY"
                );
                println!("{}", "-".repeat(68));
                for level in &ladder.levels {
                    println!(
                        "{:<6} {:>7}% {:>12.4} {:>12.2} {:>12.2} {:>12.4}",
                        level.level,
                        level.percentage,
                        level.target_price,
                        level.amount,
                        level.cumulative_amount,
                        level.average_entry
                    );
                }
            }

            let constraints = RiskProfileConstraints::from_config(&config);
            let result = validate(&ladder, balance, &constraints, open_trades);

            println!("\n=== Validation ===");
            println!("Risk level: {}", result.risk_level.as_str());
            for warning in &result.warnings {
                println!("  warning: {}", warning);
            }
            for error in &result.errors {
                println!("  error:   {}", error);
            }
            if result.valid && result.warnings.is_empty() {
                println!("  ladder is within the risk profile");
            }
        }

        Commands::SuggestLoss {
            signal,
            balance,
            risk_pct,
        } => {
            let signal = load_signal(&signal)?;
            let suggestion = suggest_loss(
                Some(&signal),
                Decimal::try_from(risk_pct)?,
                Decimal::try_from(balance)?,
            );

            match suggestion {
                Some(s) => {
                    println!("\n=== Smart Loss Suggestion ===");
                    println!("Symbol:          {}", signal.symbol);
                    println!("Liquidity tier:  {}", s.liquidity_tier.as_str());
                    println!("Suggested loss:  {:.2}%", s.suggested_loss_pct);
                    println!("Risk band:       {}", s.risk_band.as_str());
                    println!("Est. max loss:   ${:.2}", s.estimated_max_loss);
                }
                None => println!("No suggestion: balance must be positive."),
            }
        }

        Commands::Eligibility { signal, settings } => {
            let signal = load_signal(&signal)?;
            let settings = load_settings(&settings)?;
            let decision = check_signal(&signal, &settings);

            println!("\n=== Auto-Trade Eligibility ===");
            println!("Symbol:     {}", signal.symbol);
            println!("Type:       {}", signal.signal_type.as_str());
            println!("Source:     {}", signal.source);
            println!("Confidence: {:.0}%", signal.confidence_score);
            println!(
                "Eligible:   {}",
                if decision.is_eligible { "yes" } else { "no" }
            );
            for reason in &decision.reasons {
                println!("  reason: {}", reason);
            }
        }

        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            let constraints = RiskProfileConstraints::from_config(&config);

            println!("\n=== Bot Configuration ===");
            println!("Total capital:         ${}", config.total_capital);
            println!("Risk per trade:        {}%", config.risk_percentage);
            println!("Initial order:         {}%", config.initial_order_percentage);
            println!("DCA levels:            {}", config.dca_levels);
            println!("Take profit:           {}%", config.take_profit_percentage);
            println!("Leverage:              {}x", config.leverage);
            println!("Market type:           {}", config.market_type.as_str());

            println!("\n=== Derived Constraints ===");
            println!("Max risk per trade:    {}%", constraints.max_risk_per_trade);
            println!("Max DCA levels:        {}", constraints.max_dca_levels);
            println!("Max leverage:          {}x", constraints.max_leverage);
            println!("Max concurrent trades: {}", constraints.max_concurrent_trades);
            println!("Max total risk:        {}%", constraints.max_total_risk);
        }
    }

    Ok(())
}

fn parse_direction(s: &str) -> Result<TradeDirection> {
    match s.to_lowercase().as_str() {
        "long" => Ok(TradeDirection::Long),
        "short" => Ok(TradeDirection::Short),
        other => bail!("unknown direction '{}', expected long or short", other),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<BotConfiguration> {
    let Some(path) = path else {
        return Ok(BotConfiguration::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let record: serde_json::Value = serde_json::from_str(&raw)?;
    BotConfiguration::from_record(&record)
        .with_context(|| format!("invalid configuration in {}", path.display()))
}

fn load_signal(path: &std::path::Path) -> Result<Signal> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading signal file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid signal in {}", path.display()))
}

fn load_settings(path: &std::path::Path) -> Result<AutoTradingSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid settings in {}", path.display()))
}
