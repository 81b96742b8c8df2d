//! Final check of a sized plan before anything is executed.
//!
//! Units are re-derived from the rounded amounts rather than taken from the
//! sizer, so any drift introduced by per-leg truncation shows up here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ArbitrageError, Result};
use crate::finder::Opportunity;
use crate::precision::format_fixed;
use crate::sizer::SizedPlan;

/// Hard ROI floor in percent, independent of the caller's minimum return.
pub const MIN_ROI_PCT: Decimal = dec!(1);

// =============================================================================
// Validation Result
// =============================================================================

/// Why a plan was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationFailure {
    /// The plan is empty.
    NoPositions,
    /// An amount is above the venue's liquidity cap.
    LiquidityExceeded {
        venue: String,
        amount: Decimal,
        cap: Decimal,
    },
    /// ROI is below [`MIN_ROI_PCT`].
    BelowRoiFloor { roi_pct: Decimal },
    /// The plan does not make money.
    NonPositiveProfit { profit: Decimal },
}

impl ValidationFailure {
    /// Amount over the cap for [`ValidationFailure::LiquidityExceeded`].
    #[must_use]
    pub fn excess(&self) -> Option<Decimal> {
        match self {
            Self::LiquidityExceeded { amount, cap, .. } => Some(*amount - *cap),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPositions => write!(f, "No valid positions found"),
            Self::LiquidityExceeded { venue, amount, cap } => write!(
                f,
                "Position size ${} exceeds available liquidity ${} on {} by ${}",
                format_fixed(*amount, 2),
                format_fixed(*cap, 2),
                venue,
                format_fixed(*amount - *cap, 2)
            ),
            Self::BelowRoiFloor { roi_pct } => write!(
                f,
                "ROI of {}% is below minimum threshold of {}%",
                format_fixed(*roi_pct, 2),
                MIN_ROI_PCT
            ),
            Self::NonPositiveProfit { profit } => write!(
                f,
                "No guaranteed profit. Expected profit: ${}",
                format_fixed(*profit, 2)
            ),
        }
    }
}

/// Outcome of [`validate_plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanValidation {
    /// Plan respects every cap and clears the ROI floor.
    Valid {
        /// Guaranteed profit in dollars.
        profit: Decimal,
        /// Profit over total investment, in percent.
        roi_pct: Decimal,
    },
    /// Plan must not be executed.
    Invalid(ValidationFailure),
}

impl PlanValidation {
    /// Returns true if the plan can be executed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Human-readable description of the outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Valid { profit, roi_pct } => format!(
                "Valid positions with ${} minimum profit ({}% ROI)",
                format_fixed(*profit, 2),
                format_fixed(*roi_pct, 2)
            ),
            Self::Invalid(failure) => failure.to_string(),
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Valid { .. } => None,
            Self::Invalid(failure) => Some(failure),
        }
    }

    /// `(ok, message)` pair.
    #[must_use]
    pub fn into_parts(self) -> (bool, String) {
        (self.is_valid(), self.message())
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Validates a plan against the opportunity it was sized from.
///
/// Checks run in order: empty plan, liquidity caps, ROI floor, positive profit.
///
/// # Errors
/// Returns [`ArbitrageError::InvalidOpportunity`] if the opportunity has a
/// non-positive unit cost, or [`ArbitrageError::UnknownVenue`] if the plan
/// names a venue that is not one of its legs.
pub fn validate_plan(plan: &SizedPlan, opportunity: &Opportunity) -> Result<PlanValidation> {
    if plan.is_empty() {
        return Ok(reject(ValidationFailure::NoPositions));
    }
    if opportunity.implied_unit_cost <= Decimal::ZERO {
        return Err(ArbitrageError::InvalidOpportunity(format!(
            "implied unit cost {} must be positive",
            opportunity.implied_unit_cost
        )));
    }

    for position in plan.iter() {
        let leg = opportunity
            .leg(&position.venue)
            .ok_or_else(|| ArbitrageError::UnknownVenue(position.venue.clone()))?;

        if position.amount > leg.liquidity_cap {
            return Ok(reject(ValidationFailure::LiquidityExceeded {
                venue: position.venue.clone(),
                amount: position.amount,
                cap: leg.liquidity_cap,
            }));
        }
    }

    let total_investment = plan.total_investment();
    if total_investment <= Decimal::ZERO {
        return Ok(reject(ValidationFailure::NonPositiveProfit {
            profit: Decimal::ZERO,
        }));
    }

    let units = total_investment
        .checked_div(opportunity.implied_unit_cost)
        .ok_or(ArbitrageError::Overflow("plan units"))?;
    let profit = units - total_investment;
    let roi_pct = profit
        .checked_div(total_investment)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or(ArbitrageError::Overflow("plan ROI"))?;

    if roi_pct < MIN_ROI_PCT {
        return Ok(reject(ValidationFailure::BelowRoiFloor { roi_pct }));
    }
    if profit <= Decimal::ZERO {
        return Ok(reject(ValidationFailure::NonPositiveProfit { profit }));
    }

    debug!(
        total_investment = %total_investment,
        units = %units,
        profit = %profit,
        roi_pct = %roi_pct,
        "Plan validated"
    );

    Ok(PlanValidation::Valid { profit, roi_pct })
}

fn reject(failure: ValidationFailure) -> PlanValidation {
    warn!(reason = %failure, "Plan failed validation");
    PlanValidation::Invalid(failure)
}
