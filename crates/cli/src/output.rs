//! Rendering pipeline outcomes as text or JSON.

use anyhow::Result;
use clap::ValueEnum;
use pairarb_arbitrage_cross::precision::format_fixed;
use pairarb_arbitrage_cross::{Evaluation, ExecutionReport, FeeAdjustedPrices, MarketQuote};
use pairarb_core::ArbitrageConfig;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    config: &'a ArbitrageConfig,
    evaluation: &'a Evaluation,
    report: Option<ExecutionReport>,
    fee_adjusted_prices: [FeeAdjustedPrices; 2],
}

/// Renders an evaluation of `first` vs `second`.
pub fn render(
    evaluation: &Evaluation,
    first: &MarketQuote,
    second: &MarketQuote,
    config: &ArbitrageConfig,
    format: OutputFormat,
) -> Result<String> {
    let report = match evaluation {
        Evaluation::Approved {
            opportunity, plan, ..
        } => Some(ExecutionReport::build(
            &first.market_name,
            opportunity,
            plan,
            config.bankroll,
        )?),
        _ => None,
    };
    let prices = [
        FeeAdjustedPrices::from_quote(first, config.fee_rate)?,
        FeeAdjustedPrices::from_quote(second, config.fee_rate)?,
    ];

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonOutput {
            config,
            evaluation,
            report,
            fee_adjusted_prices: prices,
        })?),
        OutputFormat::Text => Ok(render_text(evaluation, report, &prices, config)),
    }
}

fn render_text(
    evaluation: &Evaluation,
    report: Option<ExecutionReport>,
    prices: &[FeeAdjustedPrices; 2],
    config: &ArbitrageConfig,
) -> String {
    match evaluation {
        Evaluation::NoOpportunity => format!(
            "No viable arbitrage opportunity found\nMarket prices (including fees):\n{}\n{}",
            prices[0], prices[1]
        ),
        Evaluation::InsufficientReturnAfterRounding { opportunity } => format!(
            "Opportunity at {}% per unit, but truncating to cents at a ${} bankroll \
             leaves either nothing to invest or less than the minimum return of {}",
            format_fixed(opportunity.roi_pct(), 2),
            config.bankroll,
            config.min_return
        ),
        Evaluation::Rejected { failure, .. } => format!("Validation failed: {failure}"),
        Evaluation::Approved { .. } => report.map(|r| r.to_string()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairarb_arbitrage_cross::evaluate_pair;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn quote(venue: &str, yes: Decimal, no: Decimal, cap: Decimal) -> MarketQuote {
        MarketQuote::new("evt", "Test market", yes, no, cap, venue)
    }

    #[test]
    fn test_text_for_no_opportunity_lists_prices() {
        let first = quote("Kalshi", dec!(0.50), dec!(0.55), dec!(10));
        let second = quote("Polymarket", dec!(0.50), dec!(0.55), dec!(10));
        let config = ArbitrageConfig::default();
        let evaluation = evaluate_pair(&first, &second, &config).unwrap();

        let text = render(&evaluation, &first, &second, &config, OutputFormat::Text).unwrap();

        assert!(text.starts_with("No viable arbitrage opportunity found"));
        assert!(text.contains("Kalshi - YES: 0.500, NO: 0.550"));
    }

    #[test]
    fn test_text_for_approved_is_report() {
        let first = quote("Kalshi", dec!(0.40), dec!(0.70), dec!(100));
        let second = quote("Polymarket", dec!(0.70), dec!(0.50), dec!(100));
        let config = ArbitrageConfig::default();
        let evaluation = evaluate_pair(&first, &second, &config).unwrap();

        let text = render(&evaluation, &first, &second, &config, OutputFormat::Text).unwrap();

        assert!(text.starts_with("Arbitrage plan for Test market:"));
        assert!(text.contains("Expected profit: $20.00 (11.11% return)"));
    }

    #[test]
    fn test_text_for_bankroll_too_small_to_invest() {
        let first = quote("Kalshi", dec!(0.40), dec!(0.70), dec!(100));
        let second = quote("Polymarket", dec!(0.70), dec!(0.50), dec!(100));
        let config = ArbitrageConfig::default().with_bankroll(dec!(0.005));
        let evaluation = evaluate_pair(&first, &second, &config).unwrap();

        let text = render(&evaluation, &first, &second, &config, OutputFormat::Text).unwrap();

        assert!(text.starts_with("Opportunity at 11.11% per unit"));
        assert!(text.contains("$0.005 bankroll leaves either nothing to invest"));
    }

    #[test]
    fn test_json_output() {
        let first = quote("Kalshi", dec!(0.40), dec!(0.70), dec!(100));
        let second = quote("Polymarket", dec!(0.70), dec!(0.50), dec!(100));
        let config = ArbitrageConfig::default();
        let evaluation = evaluate_pair(&first, &second, &config).unwrap();

        let json = render(&evaluation, &first, &second, &config, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["evaluation"]["outcome"], "approved");
        assert_eq!(value["report"]["legs"][0]["venue"], "Kalshi");
        assert_eq!(value["fee_adjusted_prices"][1]["venue"], "Polymarket");
    }
}
