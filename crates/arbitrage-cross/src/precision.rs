//! Truncation at fixed decimal places.
//!
//! Share counts and dollar amounts are always cut toward zero so that no
//! figure ever claims more than the caps or the bankroll can deliver.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for unit counts and dollar amounts.
pub const AMOUNT_DP: u32 = 2;

/// Truncates toward zero at [`AMOUNT_DP`] places.
#[must_use]
pub fn truncate_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::ToZero)
}

/// Rounds half away from zero for display only.
#[must_use]
pub fn display_round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats with exactly `dp` places, rounding half away from zero.
#[must_use]
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, display_round(value, dp))
}
