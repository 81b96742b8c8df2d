//! Built-in BTC > $100k example across Kalshi and Polymarket.

use anyhow::Result;
use clap::Args;
use pairarb_arbitrage_cross::{evaluate_pair, MarketQuote};
use pairarb_core::ArbitrageConfig;
use rust_decimal_macros::dec;

use crate::output::{render, OutputFormat};

/// Arguments for the demo command.
#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

/// Kalshi and Polymarket quotes for "Will BTC exceed $100k in 2024?".
pub fn demo_quotes() -> (MarketQuote, MarketQuote) {
    let kalshi = MarketQuote::new(
        "btc-100k-2024",
        "BTC > $100k in 2024",
        dec!(0.09),
        dec!(0.94),
        dec!(0.9),
        "Kalshi",
    );
    let polymarket = MarketQuote::new(
        "btc-100k-2024",
        "BTC > $100k in 2024",
        dec!(0.15),
        dec!(0.86),
        dec!(80.99),
        "Polymarket",
    );
    (kalshi, polymarket)
}

/// Runs the demo with the loaded configuration.
pub fn run_demo(args: DemoArgs, config: ArbitrageConfig) -> Result<()> {
    let (kalshi, polymarket) = demo_quotes();
    let evaluation = evaluate_pair(&kalshi, &polymarket, &config)?;
    println!(
        "{}",
        render(&evaluation, &kalshi, &polymarket, &config, args.format)?
    );
    Ok(())
}
