//! Cross-market arbitrage opportunity detection.
//!
//! Given two quotes for the same event, this module prices the two
//! complementary strategies (YES here + NO there, and the reverse), keeps the
//! cheaper one, and accepts it if the fee-adjusted pair cost is below $1.00
//! with at least the requested return per dollar.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{ArbitrageError, Result};
use crate::fees::{check_fee_rate, pair_cost};
use crate::precision::truncate_amount;
use crate::types::{Leg, MarketQuote, Side};

// =============================================================================
// Strategy
// =============================================================================

/// The two complementary strategies available across a quote pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// YES on the first quote, NO on the second.
    YesFirstNoSecond,
    /// NO on the first quote, YES on the second.
    NoFirstYesSecond,
}

impl Strategy {
    /// Sides bought on the (first, second) quote.
    #[must_use]
    pub fn sides(self) -> (Side, Side) {
        match self {
            Self::YesFirstNoSecond => (Side::Yes, Side::No),
            Self::NoFirstYesSecond => (Side::No, Side::Yes),
        }
    }

    /// Fee-adjusted cost of one unit-pair under this strategy, or `None` if
    /// it is too large to represent.
    #[must_use]
    pub fn cost(
        self,
        first: &MarketQuote,
        second: &MarketQuote,
        fee_rate: Decimal,
    ) -> Option<Decimal> {
        let (first_side, second_side) = self.sides();
        pair_cost(first.price(first_side), second.price(second_side), fee_rate)
    }

    /// Legs in input order.
    #[must_use]
    pub fn legs(self, first: &MarketQuote, second: &MarketQuote) -> [Leg; 2] {
        let (first_side, second_side) = self.sides();
        [first.leg(first_side), second.leg(second_side)]
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.sides();
        write!(f, "{a} first / {b} second")
    }
}

// =============================================================================
// Opportunity
// =============================================================================

/// An accepted complementary strategy and its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Which strategy was chosen.
    pub strategy: Strategy,

    /// One leg per input quote, in input order.
    pub legs: [Leg; 2],

    /// Fee-adjusted cost of one unit-pair (< 1).
    pub implied_unit_cost: Decimal,

    /// Return per dollar invested: `(1 - cost) / cost`.
    pub return_per_unit: Decimal,

    /// Complete unit-pairs both caps allow, truncated to 2 decimals.
    pub max_units: Decimal,

    /// `max_units × implied_unit_cost`.
    pub total_cost: Decimal,

    /// `max_units × (1 - implied_unit_cost)`.
    pub total_profit: Decimal,
}

impl Opportunity {
    /// Returns the leg traded on `venue`.
    #[must_use]
    pub fn leg(&self, venue: &str) -> Option<&Leg> {
        self.legs.iter().find(|leg| leg.venue == venue)
    }

    /// Return per unit as a percentage.
    #[must_use]
    pub fn roi_pct(&self) -> Decimal {
        self.return_per_unit * dec!(100)
    }

    /// Guaranteed payout minus cost, per unit-pair.
    #[must_use]
    pub fn edge_per_unit(&self) -> Decimal {
        Decimal::ONE - self.implied_unit_cost
    }
}

// =============================================================================
// Finder
// =============================================================================

/// Finds the best complementary strategy across two quotes for one event.
///
/// Strategy A (YES first + NO second) wins ties. Returns `Ok(None)` when the
/// cheaper strategy costs $1.00 or more, returns less than `min_return`, or
/// the caps leave no capacity after truncation. A return exactly equal to
/// `min_return` is accepted.
///
/// # Errors
/// Returns an error for out-of-range prices or caps, a negative fee rate or
/// minimum return, quotes for different events, or quotes from the same venue.
pub fn find_arbitrage(
    first: &MarketQuote,
    second: &MarketQuote,
    fee_rate: Decimal,
    min_return: Decimal,
) -> Result<Option<Opportunity>> {
    check_inputs(first, second, fee_rate, min_return)?;

    trace!(
        event_id = %first.event_id,
        first_venue = %first.venue_id,
        second_venue = %second.venue_id,
        "Checking for cross-market arbitrage"
    );

    // An unrepresentable cost is far above $1, so saturating keeps the comparisons exact.
    let cost_a = Strategy::YesFirstNoSecond
        .cost(first, second, fee_rate)
        .unwrap_or(Decimal::MAX);
    let cost_b = Strategy::NoFirstYesSecond
        .cost(first, second, fee_rate)
        .unwrap_or(Decimal::MAX);

    let (strategy, cost) = if cost_b < cost_a {
        (Strategy::NoFirstYesSecond, cost_b)
    } else {
        (Strategy::YesFirstNoSecond, cost_a)
    };

    if cost >= Decimal::ONE {
        trace!(
            cost_a = %cost_a,
            cost_b = %cost_b,
            "No arbitrage - combined cost >= $1.00"
        );
        return Ok(None);
    }

    let return_per_unit = (Decimal::ONE - cost) / cost;
    if return_per_unit < min_return {
        debug!(
            strategy = %strategy,
            cost = %cost,
            return_per_unit = %return_per_unit,
            min_return = %min_return,
            "Return below threshold"
        );
        return Ok(None);
    }

    let legs = strategy.legs(first, second);
    let max_units = capacity_units(&legs, fee_rate)?;

    if max_units <= Decimal::ZERO {
        debug!(
            first_cap = %legs[0].liquidity_cap,
            second_cap = %legs[1].liquidity_cap,
            "No capacity - liquidity caps allow less than 0.01 units"
        );
        return Ok(None);
    }

    let opportunity = Opportunity {
        strategy,
        implied_unit_cost: cost,
        return_per_unit,
        max_units,
        total_cost: max_units * cost,
        total_profit: max_units * (Decimal::ONE - cost),
        legs,
    };

    info!(
        event_id = %first.event_id,
        first_venue = %opportunity.legs[0].venue,
        first_side = %opportunity.legs[0].side,
        first_price = %opportunity.legs[0].price,
        second_venue = %opportunity.legs[1].venue,
        second_side = %opportunity.legs[1].side,
        second_price = %opportunity.legs[1].price,
        implied_unit_cost = %opportunity.implied_unit_cost,
        return_per_unit = %opportunity.return_per_unit,
        max_units = %opportunity.max_units,
        "Cross-market arbitrage opportunity detected"
    );

    Ok(Some(opportunity))
}

/// Largest unit-pair count both caps support, truncated to 2 decimals.
///
/// A leg whose `cap / price` overflows cannot be the binding one, so it is
/// left out of the minimum. Both legs overflowing is an error.
fn capacity_units(legs: &[Leg; 2], fee_rate: Decimal) -> Result<Decimal> {
    legs.iter()
        .filter_map(|leg| {
            leg.effective_price(fee_rate)
                .and_then(|price| leg.liquidity_cap.checked_div(price))
        })
        .min()
        .map(truncate_amount)
        .ok_or(ArbitrageError::Overflow("leg capacity"))
}

fn check_inputs(
    first: &MarketQuote,
    second: &MarketQuote,
    fee_rate: Decimal,
    min_return: Decimal,
) -> Result<()> {
    first.validate()?;
    second.validate()?;
    check_fee_rate(fee_rate)?;

    if min_return < Decimal::ZERO {
        return Err(ArbitrageError::NegativeMinReturn(min_return));
    }
    if first.event_id != second.event_id {
        return Err(ArbitrageError::EventMismatch {
            first: first.event_id.clone(),
            second: second.event_id.clone(),
        });
    }
    if first.venue_id == second.venue_id {
        return Err(ArbitrageError::DuplicateVenue(first.venue_id.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Helper Functions ====================

    fn quote(venue: &str, yes: Decimal, no: Decimal, cap: Decimal) -> MarketQuote {
        MarketQuote::new("btc-100k-2024", "BTC > $100k in 2024", yes, no, cap, venue)
    }

    fn kalshi() -> MarketQuote {
        quote("Kalshi", dec!(0.09), dec!(0.94), dec!(0.9))
    }

    fn polymarket() -> MarketQuote {
        quote("Polymarket", dec!(0.15), dec!(0.86), dec!(80.99))
    }

    // ==================== Strategy Tests ====================

    #[test]
    fn test_strategy_sides() {
        assert_eq!(Strategy::YesFirstNoSecond.sides(), (Side::Yes, Side::No));
        assert_eq!(Strategy::NoFirstYesSecond.sides(), (Side::No, Side::Yes));
    }

    #[test]
    fn test_strategy_costs() {
        let (k, p) = (kalshi(), polymarket());
        assert_eq!(
            Strategy::YesFirstNoSecond.cost(&k, &p, Decimal::ZERO),
            Some(dec!(0.95))
        );
        assert_eq!(
            Strategy::NoFirstYesSecond.cost(&k, &p, Decimal::ZERO),
            Some(dec!(1.09))
        );
    }

    // ==================== Detection Tests ====================

    #[test]
    fn test_find_picks_cheaper_strategy() {
        let opp = find_arbitrage(&kalshi(), &polymarket(), Decimal::ZERO, dec!(0.01))
            .unwrap()
            .unwrap();

        assert_eq!(opp.strategy, Strategy::YesFirstNoSecond);
        assert_eq!(opp.implied_unit_cost, dec!(0.95));
        assert_eq!(opp.legs[0].venue, "Kalshi");
        assert_eq!(opp.legs[0].side, Side::Yes);
        assert_eq!(opp.legs[1].venue, "Polymarket");
        assert_eq!(opp.legs[1].side, Side::No);
    }

    #[test]
    fn test_find_capacity_limited_by_smaller_cap() {
        let opp = find_arbitrage(&kalshi(), &polymarket(), Decimal::ZERO, dec!(0.01))
            .unwrap()
            .unwrap();

        // Kalshi: 0.9 / 0.09 = 10; Polymarket: 80.99 / 0.86 = 94.17...
        assert_eq!(opp.max_units, dec!(10));
        assert_eq!(opp.total_cost, dec!(9.50));
        assert_eq!(opp.total_profit, dec!(0.50));
    }

    #[test]
    fn test_find_reverse_strategy_when_cheaper() {
        let first = quote("A", dec!(0.60), dec!(0.30), dec!(100));
        let second = quote("B", dec!(0.65), dec!(0.55), dec!(100));

        // A: 0.60 + 0.55 = 1.15, B: 0.30 + 0.65 = 0.95
        let opp = find_arbitrage(&first, &second, Decimal::ZERO, Decimal::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(opp.strategy, Strategy::NoFirstYesSecond);
        assert_eq!(opp.legs[0].side, Side::No);
        assert_eq!(opp.legs[0].price, dec!(0.30));
        assert_eq!(opp.legs[1].side, Side::Yes);
    }

    #[test]
    fn test_find_tie_goes_to_first_strategy() {
        let first = quote("A", dec!(0.40), dec!(0.40), dec!(100));
        let second = quote("B", dec!(0.50), dec!(0.50), dec!(100));

        let opp = find_arbitrage(&first, &second, Decimal::ZERO, Decimal::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(opp.strategy, Strategy::YesFirstNoSecond);
    }

    #[test]
    fn test_find_rejects_cost_of_exactly_one() {
        let first = quote("A", dec!(0.50), dec!(0.50), dec!(100));
        let second = quote("B", dec!(0.50), dec!(0.50), dec!(100));

        let result = find_arbitrage(&first, &second, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_find_fees_can_remove_opportunity() {
        // 0.95 × 1.06 = 1.007 >= 1
        let result = find_arbitrage(&kalshi(), &polymarket(), dec!(0.06), Decimal::ZERO).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_find_fees_scale_capacity() {
        let first = quote("A", dec!(0.40), dec!(0.90), dec!(10.5));
        let second = quote("B", dec!(0.90), dec!(0.50), dec!(100));

        // cost = (0.40 + 0.50) × 1.05 = 0.945, first leg capacity 10.5 / 0.42 = 25
        let opp = find_arbitrage(&first, &second, dec!(0.05), Decimal::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(opp.implied_unit_cost, dec!(0.945));
        assert_eq!(opp.max_units, dec!(25));
    }

    #[test]
    fn test_find_threshold_is_inclusive() {
        let first = quote("A", dec!(0.30), dec!(0.90), dec!(100));
        let second = quote("B", dec!(0.90), dec!(0.50), dec!(100));

        // cost 0.80, return exactly 0.25
        let accepted = find_arbitrage(&first, &second, Decimal::ZERO, dec!(0.25)).unwrap();
        assert_eq!(accepted.unwrap().return_per_unit, dec!(0.25));

        let rejected = find_arbitrage(&first, &second, Decimal::ZERO, dec!(0.2500000001)).unwrap();
        assert!(rejected.is_none());
    }

    #[test]
    fn test_find_zero_capacity_is_no_opportunity() {
        let first = quote("A", dec!(0.40), dec!(0.90), dec!(0));
        let second = quote("B", dec!(0.90), dec!(0.50), dec!(100));

        let result = find_arbitrage(&first, &second, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_find_truncates_capacity() {
        let first = quote("A", dec!(0.30), dec!(0.90), dec!(1));
        let second = quote("B", dec!(0.90), dec!(0.60), dec!(100));

        // 1 / 0.30 = 3.333... -> 3.33
        let opp = find_arbitrage(&first, &second, Decimal::ZERO, Decimal::ZERO)
            .unwrap()
            .unwrap();
        assert_eq!(opp.max_units, dec!(3.33));
    }

    // ==================== Overflow Tests ====================

    #[test]
    fn test_find_skips_leg_whose_capacity_overflows() {
        // 1e10 / 1e-20 does not fit in a Decimal; the other leg binds
        let first = quote(
            "A",
            dec!(0.00000000000000000001),
            dec!(0.90),
            dec!(10000000000),
        );
        let second = quote("B", dec!(0.90), dec!(0.50), dec!(100));

        let opp = find_arbitrage(&first, &second, Decimal::ZERO, dec!(0.01))
            .unwrap()
            .unwrap();

        assert_eq!(opp.strategy, Strategy::YesFirstNoSecond);
        assert_eq!(opp.max_units, dec!(200));
    }

    #[test]
    fn test_find_both_capacities_overflowing_is_an_error() {
        let tiny = dec!(0.00000000000000000001);
        let first = quote("A", tiny, dec!(0.90), dec!(10000000000));
        let second = quote("B", dec!(0.90), tiny, dec!(10000000000));

        assert_eq!(
            find_arbitrage(&first, &second, Decimal::ZERO, dec!(0.01)),
            Err(ArbitrageError::Overflow("leg capacity"))
        );
    }

    #[test]
    fn test_find_huge_fee_rate_is_no_opportunity() {
        let result = find_arbitrage(&kalshi(), &polymarket(), Decimal::MAX, Decimal::ZERO).unwrap();
        assert!(result.is_none());
    }

    // ==================== Input Validation Tests ====================

    #[test]
    fn test_find_rejects_event_mismatch() {
        let mut other = polymarket();
        other.event_id = "eth-5k-2024".to_string();

        let err = find_arbitrage(&kalshi(), &other, Decimal::ZERO, dec!(0.01)).unwrap_err();
        assert!(matches!(err, ArbitrageError::EventMismatch { .. }));
    }

    #[test]
    fn test_find_rejects_same_venue() {
        let mut other = polymarket();
        other.venue_id = "Kalshi".to_string();

        let err = find_arbitrage(&kalshi(), &other, Decimal::ZERO, dec!(0.01)).unwrap_err();
        assert_eq!(err, ArbitrageError::DuplicateVenue("Kalshi".to_string()));
    }

    #[test]
    fn test_find_rejects_negative_parameters() {
        assert_eq!(
            find_arbitrage(&kalshi(), &polymarket(), dec!(-0.01), dec!(0.01)),
            Err(ArbitrageError::NegativeFeeRate(dec!(-0.01)))
        );
        assert_eq!(
            find_arbitrage(&kalshi(), &polymarket(), Decimal::ZERO, dec!(-0.01)),
            Err(ArbitrageError::NegativeMinReturn(dec!(-0.01)))
        );
    }

    #[test]
    fn test_find_rejects_invalid_price() {
        let bad = quote("Polymarket", dec!(0), dec!(0.86), dec!(80.99));
        let err = find_arbitrage(&kalshi(), &bad, Decimal::ZERO, dec!(0.01)).unwrap_err();
        assert!(matches!(err, ArbitrageError::NonPositivePrice { .. }));
    }

    // ==================== Helper Method Tests ====================

    #[test]
    fn test_opportunity_helpers() {
        let opp = find_arbitrage(&kalshi(), &polymarket(), Decimal::ZERO, dec!(0.01))
            .unwrap()
            .unwrap();

        assert_eq!(opp.leg("Polymarket").map(|l| l.price), Some(dec!(0.86)));
        assert!(opp.leg("PredictIt").is_none());
        assert_eq!(opp.edge_per_unit(), dec!(0.05));
        assert!(opp.roi_pct() > dec!(5.26) && opp.roi_pct() < dec!(5.27));
    }
}
