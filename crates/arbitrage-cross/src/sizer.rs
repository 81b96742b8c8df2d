//! Position sizing for an accepted opportunity.
//!
//! Scales the opportunity's unit capacity down to the bankroll (never up),
//! then converts units into a dollar amount per leg at the fee-adjusted
//! price, truncated to cents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ArbitrageError, Result};
use crate::fees::check_fee_rate;
use crate::finder::Opportunity;
use crate::precision::truncate_amount;

// =============================================================================
// Sized Plan
// =============================================================================

/// Dollar amount to invest on one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAmount {
    /// Venue the amount is invested on.
    pub venue: String,
    /// Dollars to invest, in cents.
    pub amount: Decimal,
}

/// Per-venue dollar amounts, in leg order. Empty means "do not trade".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizedPlan {
    positions: Vec<PositionAmount>,
}

impl SizedPlan {
    /// A plan with no positions.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a plan from `(venue, amount)` pairs, keeping their order.
    ///
    /// A venue listed twice keeps its last amount.
    #[must_use]
    pub fn from_amounts<I, S>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        amounts
            .into_iter()
            .fold(Self::empty(), |plan, (venue, amount)| {
                plan.with_amount(venue, amount)
            })
    }

    /// Sets the amount for `venue`, replacing any existing entry.
    #[must_use]
    pub fn with_amount(mut self, venue: impl Into<String>, amount: Decimal) -> Self {
        let venue = venue.into();
        match self.positions.iter_mut().find(|p| p.venue == venue) {
            Some(existing) => existing.amount = amount,
            None => self.positions.push(PositionAmount { venue, amount }),
        }
        self
    }

    /// Returns true if there is nothing to trade.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of venues in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Amount for `venue`, if planned.
    #[must_use]
    pub fn amount(&self, venue: &str) -> Option<Decimal> {
        self.positions
            .iter()
            .find(|p| p.venue == venue)
            .map(|p| p.amount)
    }

    /// Positions in leg order.
    pub fn iter(&self) -> impl Iterator<Item = &PositionAmount> {
        self.positions.iter()
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total_investment(&self) -> Decimal {
        self.positions.iter().map(|p| p.amount).sum()
    }
}

// =============================================================================
// Sizer
// =============================================================================

/// Sizes an opportunity to a bankroll.
///
/// `scale = min(1, bankroll / total_cost)` and `units = max_units × scale`.
/// Every leg, including the last, gets `truncate(units × fee-adjusted price)`
/// independently; the last leg is not a remainder. If the rounded plan
/// returns less than `min_return` per dollar, or truncation leaves nothing to
/// invest, an empty plan is returned.
///
/// # Errors
/// Returns [`ArbitrageError::InvalidOpportunity`] if the opportunity's total
/// cost is not positive, or an input error for a negative bankroll, fee rate
/// or minimum return.
pub fn size_positions(
    opportunity: &Opportunity,
    bankroll: Decimal,
    fee_rate: Decimal,
    min_return: Decimal,
) -> Result<SizedPlan> {
    check_fee_rate(fee_rate)?;
    if min_return < Decimal::ZERO {
        return Err(ArbitrageError::NegativeMinReturn(min_return));
    }
    if bankroll < Decimal::ZERO {
        return Err(ArbitrageError::NegativeBankroll(bankroll));
    }
    if opportunity.total_cost <= Decimal::ZERO {
        return Err(ArbitrageError::InvalidOpportunity(format!(
            "total cost {} must be positive",
            opportunity.total_cost
        )));
    }

    // Only divide when the bankroll is the binding side; the quotient is then below 1.
    let scale = if bankroll >= opportunity.total_cost {
        Decimal::ONE
    } else {
        bankroll / opportunity.total_cost
    };
    let units = opportunity.max_units * scale;

    debug!(
        bankroll = %bankroll,
        total_cost = %opportunity.total_cost,
        scale = %scale,
        units = %units,
        "Scaling opportunity to bankroll"
    );

    let plan = opportunity
        .legs
        .iter()
        .try_fold(SizedPlan::empty(), |plan, leg| {
            let notional = leg
                .effective_price(fee_rate)
                .and_then(|price| units.checked_mul(price))
                .ok_or(ArbitrageError::Overflow("leg notional"))?;
            Ok::<_, ArbitrageError>(plan.with_amount(leg.venue.clone(), truncate_amount(notional)))
        })?;

    let total_investment = plan.total_investment();
    if total_investment <= Decimal::ZERO {
        warn!(
            units = %units,
            "Rounded plan invests nothing - dropping"
        );
        return Ok(SizedPlan::empty());
    }

    let expected_profit = units - total_investment;
    let realized_return = expected_profit
        .checked_div(total_investment)
        .ok_or(ArbitrageError::Overflow("realized return"))?;
    if realized_return < min_return {
        warn!(
            total_investment = %total_investment,
            expected_profit = %expected_profit,
            realized_return = %realized_return,
            min_return = %min_return,
            "Return below threshold after rounding - dropping plan"
        );
        return Ok(SizedPlan::empty());
    }

    debug!(
        total_investment = %total_investment,
        expected_profit = %expected_profit,
        "Sized positions"
    );

    Ok(plan)
}
