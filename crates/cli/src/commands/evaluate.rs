//! Evaluate a quote pair loaded from a TOML file.
//!
//! ## Example Usage
//!
//! ```bash
//! # Use config/Config.toml for fee rate, minimum return and bankroll
//! cargo run -p pairarb-cli -- evaluate --quotes config/quotes.btc-100k.toml
//!
//! # Override the bankroll and print JSON
//! cargo run -p pairarb-cli -- evaluate --quotes pair.toml --bankroll 250 --format json
//! ```

use anyhow::Result;
use clap::Args;
use pairarb_arbitrage_cross::evaluate_pair;
use pairarb_core::ArbitrageConfig;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

use crate::output::{render, OutputFormat};
use crate::quotes::load_quote_pair;

/// Arguments for the evaluate command.
#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// TOML file with exactly two [[quotes]] entries for the same event
    #[arg(short, long)]
    pub quotes: PathBuf,

    /// Capital available (in dollars); overrides the config file
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    /// Proportional fee rate (0.02 = 2%); overrides the config file
    #[arg(long)]
    pub fee_rate: Option<Decimal>,

    /// Minimum return per dollar (0.01 = 1%); overrides the config file
    #[arg(long)]
    pub min_return: Option<Decimal>,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

impl EvaluateArgs {
    /// Applies command-line overrides to the loaded configuration.
    fn apply_overrides(&self, mut config: ArbitrageConfig) -> ArbitrageConfig {
        if let Some(bankroll) = self.bankroll {
            config = config.with_bankroll(bankroll);
        }
        if let Some(fee_rate) = self.fee_rate {
            config = config.with_fee_rate(fee_rate);
        }
        if let Some(min_return) = self.min_return {
            config = config.with_min_return(min_return);
        }
        config
    }
}

/// Runs the evaluate command.
pub fn run_evaluate(args: EvaluateArgs, config: ArbitrageConfig) -> Result<()> {
    let config = args.apply_overrides(config);
    config.validate()?;

    let (first, second) = load_quote_pair(&args.quotes)?;
    info!(
        quotes = %args.quotes.display(),
        event_id = %first.event_id,
        fee_rate = %config.fee_rate,
        min_return = %config.min_return,
        bankroll = %config.bankroll,
        "Evaluating quote pair"
    );

    let evaluation = evaluate_pair(&first, &second, &config)?;
    println!("{}", render(&evaluation, &first, &second, &config, args.format)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            quotes: PathBuf::from("pair.toml"),
            bankroll: None,
            fee_rate: None,
            min_return: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = ArbitrageConfig::default();
        assert_eq!(args().apply_overrides(config.clone()), config);
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = EvaluateArgs {
            bankroll: Some(dec!(250)),
            min_return: Some(dec!(0.05)),
            ..args()
        };
        let config = args.apply_overrides(ArbitrageConfig::default().with_fee_rate(dec!(0.01)));

        assert_eq!(config.bankroll, dec!(250));
        assert_eq!(config.min_return, dec!(0.05));
        assert_eq!(config.fee_rate, dec!(0.01));
    }
}
