//! One pass of find → size → validate over a quote pair.
//!
//! Each step only consumes the previous step's output. Nothing here is
//! stateful, so pairs can be evaluated concurrently without coordination.

use pairarb_core::ArbitrageConfig;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::finder::{find_arbitrage, Opportunity};
use crate::sizer::{size_positions, SizedPlan};
use crate::types::MarketQuote;
use crate::validator::{validate_plan, PlanValidation, ValidationFailure};

/// How far a quote pair got through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Evaluation {
    /// Neither strategy clears cost < 1 and the minimum return.
    NoOpportunity,
    /// The opportunity existed, but the rounded plan was dropped.
    InsufficientReturnAfterRounding { opportunity: Opportunity },
    /// A plan was sized but failed validation.
    Rejected {
        opportunity: Opportunity,
        plan: SizedPlan,
        failure: ValidationFailure,
    },
    /// A plan is safe to hand to an executor.
    Approved {
        opportunity: Opportunity,
        plan: SizedPlan,
        validation: PlanValidation,
    },
}

impl Evaluation {
    /// Returns true if the plan passed validation.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }

    /// The opportunity, if one was found.
    #[must_use]
    pub fn opportunity(&self) -> Option<&Opportunity> {
        match self {
            Self::NoOpportunity => None,
            Self::InsufficientReturnAfterRounding { opportunity }
            | Self::Rejected { opportunity, .. }
            | Self::Approved { opportunity, .. } => Some(opportunity),
        }
    }

    /// The sized plan, if sizing produced one.
    #[must_use]
    pub fn plan(&self) -> Option<&SizedPlan> {
        match self {
            Self::Rejected { plan, .. } | Self::Approved { plan, .. } => Some(plan),
            _ => None,
        }
    }
}

/// Runs the finder, sizer and validator once.
///
/// # Errors
/// Propagates input errors from any step.
pub fn evaluate_pair(
    first: &MarketQuote,
    second: &MarketQuote,
    config: &ArbitrageConfig,
) -> Result<Evaluation> {
    let Some(opportunity) = find_arbitrage(first, second, config.fee_rate, config.min_return)?
    else {
        info!(
            event_id = %first.event_id,
            first_venue = %first.venue_id,
            second_venue = %second.venue_id,
            "No viable arbitrage opportunity"
        );
        return Ok(Evaluation::NoOpportunity);
    };

    let plan = size_positions(
        &opportunity,
        config.bankroll,
        config.fee_rate,
        config.min_return,
    )?;
    if plan.is_empty() {
        return Ok(Evaluation::InsufficientReturnAfterRounding { opportunity });
    }

    let evaluation = match validate_plan(&plan, &opportunity)? {
        PlanValidation::Invalid(failure) => Evaluation::Rejected {
            opportunity,
            plan,
            failure,
        },
        validation @ PlanValidation::Valid { .. } => {
            info!(
                event_id = %first.event_id,
                total_investment = %plan.total_investment(),
                message = %validation.message(),
                "Arbitrage plan approved"
            );
            Evaluation::Approved {
                opportunity,
                plan,
                validation,
            }
        }
    };

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn quote(venue: &str, yes: Decimal, no: Decimal, cap: Decimal) -> MarketQuote {
        MarketQuote::new("evt", "Test market", yes, no, cap, venue)
    }

    #[test]
    fn test_no_opportunity() {
        let first = quote("A", dec!(0.50), dec!(0.55), dec!(100));
        let second = quote("B", dec!(0.50), dec!(0.55), dec!(100));

        let result = evaluate_pair(&first, &second, &ArbitrageConfig::default()).unwrap();

        assert_eq!(result, Evaluation::NoOpportunity);
        assert!(result.opportunity().is_none());
        assert!(result.plan().is_none());
    }

    #[test]
    fn test_approved() {
        let first = quote("A", dec!(0.40), dec!(0.70), dec!(100));
        let second = quote("B", dec!(0.70), dec!(0.50), dec!(100));

        let result = evaluate_pair(&first, &second, &ArbitrageConfig::default()).unwrap();

        assert!(result.is_approved());
        assert_eq!(result.plan().unwrap().amount("A"), Some(dec!(80)));
    }

    #[test]
    fn test_tiny_bankroll_rounds_away() {
        let first = quote("A", dec!(0.40), dec!(0.70), dec!(100));
        let second = quote("B", dec!(0.70), dec!(0.50), dec!(100));
        let config = ArbitrageConfig::default().with_bankroll(dec!(0.005));

        let result = evaluate_pair(&first, &second, &config).unwrap();

        assert!(matches!(
            result,
            Evaluation::InsufficientReturnAfterRounding { .. }
        ));
        assert!(result.opportunity().is_some());
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        let first = quote("A", dec!(0.00000000000000000001), dec!(0.90), dec!(10000000000));
        let second = quote("B", dec!(0.90), dec!(0.50), dec!(100));
        let config = ArbitrageConfig::default().with_bankroll(Decimal::MAX);

        let result = evaluate_pair(&first, &second, &config).unwrap();
        assert!(result.is_approved());
        assert_eq!(result.plan().unwrap().amount("B"), Some(dec!(100)));

        let config = ArbitrageConfig::default().with_fee_rate(Decimal::MAX);
        assert_eq!(
            evaluate_pair(&first, &second, &config).unwrap(),
            Evaluation::NoOpportunity
        );
    }

    #[test]
    fn test_below_roi_floor_is_rejected() {
        // cost 0.995: return ~0.5% clears a 0.1% minimum but not the 1% floor
        let first = quote("A", dec!(0.495), dec!(0.70), dec!(100));
        let second = quote("B", dec!(0.70), dec!(0.50), dec!(100));
        let config = ArbitrageConfig::default().with_min_return(dec!(0.001));

        let result = evaluate_pair(&first, &second, &config).unwrap();

        assert!(matches!(
            result,
            Evaluation::Rejected {
                failure: ValidationFailure::BelowRoiFloor { .. },
                ..
            }
        ));
    }
}
