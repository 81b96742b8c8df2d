//! Errors for invalid arbitrage inputs.
//!
//! "No opportunity" and "rounding ate the return" are normal outcomes and are
//! not represented here. These variants cover inputs the pipeline refuses to
//! compute with.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Side;

/// Errors from the arbitrage finder, sizer and validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArbitrageError {
    /// A quoted price was zero or negative.
    #[error("Invalid input: {side} price {price} on {venue} must be positive")]
    NonPositivePrice {
        venue: String,
        side: Side,
        price: Decimal,
    },

    /// A quoted price was above 1.
    #[error("Invalid input: {side} price {price} on {venue} exceeds 1")]
    PriceAboveOne {
        venue: String,
        side: Side,
        price: Decimal,
    },

    /// A liquidity cap was negative.
    #[error("Invalid input: max position {max_position} on {venue} is negative")]
    NegativeMaxPosition { venue: String, max_position: Decimal },

    /// Fee rate was negative.
    #[error("Invalid input: fee rate {0} is negative")]
    NegativeFeeRate(Decimal),

    /// Minimum return was negative.
    #[error("Invalid input: minimum return {0} is negative")]
    NegativeMinReturn(Decimal),

    /// Bankroll was negative.
    #[error("Invalid input: bankroll {0} is negative")]
    NegativeBankroll(Decimal),

    /// The two quotes are for different events.
    #[error("Invalid input: quotes reference different events ({first} vs {second})")]
    EventMismatch { first: String, second: String },

    /// Both quotes come from the same venue.
    #[error("Invalid input: both quotes come from venue {0}")]
    DuplicateVenue(String),

    /// Opportunity cannot be sized or validated (zero cost).
    #[error("Invalid opportunity: {0}")]
    InvalidOpportunity(String),

    /// A plan references a venue that is not one of the opportunity's legs.
    #[error("Invalid input: venue {0} is not a leg of this opportunity")]
    UnknownVenue(String),

    /// An intermediate amount does not fit in a `Decimal`.
    #[error("Invalid input: {0} exceeds the representable decimal range")]
    Overflow(&'static str),
}

/// Result alias for arbitrage operations.
pub type Result<T> = std::result::Result<T, ArbitrageError>;
