//! Human-readable and JSON reporting of approved plans.
//!
//! Reporting never places orders. Display rounding here is for people only
//! and never feeds back into sizing or validation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{ArbitrageError, Result};
use crate::fees::fee_adjusted;
use crate::finder::Opportunity;
use crate::precision::{display_round, format_fixed};
use crate::sizer::SizedPlan;
use crate::types::{MarketQuote, Side};

// =============================================================================
// Execution Report
// =============================================================================

/// One planned position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegReport {
    pub venue: String,
    pub side: Side,
    /// Quoted price before fees.
    pub price: Decimal,
    /// Dollars to invest.
    pub amount: Decimal,
    /// `amount / cap × 100`, to 0.1%. Zero when the cap is zero.
    pub liquidity_used_pct: Decimal,
}

/// Summary of a plan, ready to print or serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub market_name: String,
    pub legs: Vec<LegReport>,
    pub total_investment: Decimal,
    /// `total_investment / implied_unit_cost`.
    pub units: Decimal,
    pub profit: Decimal,
    /// To 0.01%.
    pub roi_pct: Decimal,
    /// Guaranteed payout minus fee-adjusted cost, per unit-pair.
    pub edge_per_unit: Decimal,
    /// Share of the bankroll used, to 0.1%. `None` for a zero bankroll.
    pub capital_efficiency_pct: Option<Decimal>,
}

impl ExecutionReport {
    /// Builds the report for a plan sized from `opportunity`.
    ///
    /// # Errors
    /// Returns an error if the plan names a venue outside the opportunity,
    /// invests nothing, or the opportunity has a non-positive unit cost.
    pub fn build(
        market_name: &str,
        opportunity: &Opportunity,
        plan: &SizedPlan,
        bankroll: Decimal,
    ) -> Result<Self> {
        if opportunity.implied_unit_cost <= Decimal::ZERO {
            return Err(ArbitrageError::InvalidOpportunity(format!(
                "implied unit cost {} must be positive",
                opportunity.implied_unit_cost
            )));
        }

        let total_investment = plan.total_investment();
        if total_investment <= Decimal::ZERO {
            return Err(ArbitrageError::InvalidOpportunity(
                "plan invests nothing".to_string(),
            ));
        }

        let legs = plan
            .iter()
            .map(|position| {
                let leg = opportunity
                    .leg(&position.venue)
                    .ok_or_else(|| ArbitrageError::UnknownVenue(position.venue.clone()))?;
                let liquidity_used_pct = if leg.liquidity_cap > Decimal::ZERO {
                    percent_of(position.amount, leg.liquidity_cap)
                        .map(|pct| display_round(pct, 1))
                        .ok_or(ArbitrageError::Overflow("liquidity used"))?
                } else {
                    Decimal::ZERO
                };
                Ok(LegReport {
                    venue: position.venue.clone(),
                    side: leg.side,
                    price: leg.price,
                    amount: position.amount,
                    liquidity_used_pct,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let units = total_investment
            .checked_div(opportunity.implied_unit_cost)
            .ok_or(ArbitrageError::Overflow("plan units"))?;
        let profit = units - total_investment;
        let roi_pct = percent_of(profit, total_investment)
            .map(|pct| display_round(pct, 2))
            .ok_or(ArbitrageError::Overflow("plan ROI"))?;
        let capital_efficiency_pct = if bankroll > Decimal::ZERO {
            let pct = percent_of(total_investment, bankroll)
                .ok_or(ArbitrageError::Overflow("capital efficiency"))?;
            Some(display_round(pct, 1))
        } else {
            None
        };

        Ok(Self {
            market_name: market_name.to_string(),
            legs,
            total_investment,
            units,
            profit,
            roi_pct,
            edge_per_unit: opportunity.edge_per_unit(),
            capital_efficiency_pct,
        })
    }
}

/// `part / whole × 100`, or `None` on overflow.
fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(dec!(100))
}

impl std::fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Arbitrage plan for {}:", self.market_name)?;
        for leg in &self.legs {
            writeln!(
                f,
                "  {}: {} position at {} with ${} ({}% of available liquidity)",
                leg.venue,
                leg.side,
                format_fixed(leg.price, 3),
                format_fixed(leg.amount, 2),
                format_fixed(leg.liquidity_used_pct, 1)
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Expected profit: ${} ({}% return)",
            format_fixed(self.profit, 2),
            format_fixed(self.roi_pct, 2)
        )?;
        writeln!(
            f,
            "Total investment: ${}",
            format_fixed(self.total_investment, 2)
        )?;
        write!(
            f,
            "Edge per unit: ${} after fees",
            format_fixed(self.edge_per_unit, 3)
        )?;
        if let Some(efficiency) = self.capital_efficiency_pct {
            write!(
                f,
                "\nCapital efficiency: {}% of bankroll used",
                format_fixed(efficiency, 1)
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// Fee-Adjusted Prices
// =============================================================================

/// A quote's prices after fees, shown when no opportunity was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeAdjustedPrices {
    pub venue: String,
    pub yes_price: Decimal,
    pub no_price: Decimal,
}

impl FeeAdjustedPrices {
    /// # Errors
    /// Returns [`ArbitrageError::Overflow`] if a fee-adjusted price does not
    /// fit in a `Decimal`.
    pub fn from_quote(quote: &MarketQuote, fee_rate: Decimal) -> Result<Self> {
        let adjusted = |price| {
            fee_adjusted(price, fee_rate).ok_or(ArbitrageError::Overflow("fee-adjusted price"))
        };
        Ok(Self {
            venue: quote.venue_id.clone(),
            yes_price: adjusted(quote.yes_price)?,
            no_price: adjusted(quote.no_price)?,
        })
    }
}

impl std::fmt::Display for FeeAdjustedPrices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - YES: {}, NO: {}",
            self.venue,
            format_fixed(self.yes_price, 3),
            format_fixed(self.no_price, 3)
        )
    }
}
