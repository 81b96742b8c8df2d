//! Proportional fee handling.
//!
//! Every venue charges the same proportional surcharge, applied
//! multiplicatively to each quoted price: `price × (1 + fee_rate)`.
//!
//! Fee rates have no upper bound, so every helper here uses checked
//! arithmetic and returns `None` when the result leaves the `Decimal` range.

use rust_decimal::Decimal;

use crate::error::{ArbitrageError, Result};

/// Multiplier applied to every quoted price, or `None` on overflow.
#[must_use]
pub fn fee_multiplier(fee_rate: Decimal) -> Option<Decimal> {
    Decimal::ONE.checked_add(fee_rate)
}

/// Returns `price × (1 + fee_rate)`, or `None` on overflow.
#[must_use]
pub fn fee_adjusted(price: Decimal, fee_rate: Decimal) -> Option<Decimal> {
    fee_multiplier(fee_rate).and_then(|multiplier| price.checked_mul(multiplier))
}

/// Cost of one unit-pair: both prices fee-adjusted and summed.
///
/// `None` means the cost is too large to represent, which is always above $1.
#[must_use]
pub fn pair_cost(first_price: Decimal, second_price: Decimal, fee_rate: Decimal) -> Option<Decimal> {
    fee_adjusted(first_price, fee_rate)?.checked_add(fee_adjusted(second_price, fee_rate)?)
}

/// Rejects negative fee rates.
///
/// # Errors
/// Returns [`ArbitrageError::NegativeFeeRate`] if `fee_rate < 0`.
pub fn check_fee_rate(fee_rate: Decimal) -> Result<()> {
    if fee_rate < Decimal::ZERO {
        return Err(ArbitrageError::NegativeFeeRate(fee_rate));
    }
    Ok(())
}
