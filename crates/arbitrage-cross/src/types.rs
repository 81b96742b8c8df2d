//! Shared types for cross-market arbitrage.
//!
//! This module defines the quote snapshot supplied by callers and the leg
//! record an opportunity is built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ArbitrageError, Result};

// =============================================================================
// Side
// =============================================================================

/// Outcome side of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// The event happens.
    Yes,
    /// The event does not happen.
    No,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Yes => "YES",
            Side::No => "NO",
        })
    }
}

// =============================================================================
// Market Quote
// =============================================================================

/// Snapshot of one venue's prices for a binary event.
///
/// Quotes are caller-supplied and never mutated. YES and NO prices are not
/// assumed to sum to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Identifier of the real-world event (e.g., "btc-100k-2024").
    pub event_id: String,

    /// Human-readable market label.
    pub market_name: String,

    /// YES price as a probability in (0, 1].
    pub yes_price: Decimal,

    /// NO price as a probability in (0, 1].
    pub no_price: Decimal,

    /// Maximum dollar notional tradable on whichever side is chosen.
    pub max_position: Decimal,

    /// Venue quoting this market (e.g., "Kalshi"). Plans are keyed by it.
    pub venue_id: String,
}

impl MarketQuote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(
        event_id: impl Into<String>,
        market_name: impl Into<String>,
        yes_price: Decimal,
        no_price: Decimal,
        max_position: Decimal,
        venue_id: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            market_name: market_name.into(),
            yes_price,
            no_price,
            max_position,
            venue_id: venue_id.into(),
        }
    }

    /// Returns the quoted price for a side.
    #[must_use]
    pub fn price(&self, side: Side) -> Decimal {
        match side {
            Side::Yes => self.yes_price,
            Side::No => self.no_price,
        }
    }

    /// Builds the leg for buying `side` on this quote.
    #[must_use]
    pub fn leg(&self, side: Side) -> Leg {
        Leg {
            venue: self.venue_id.clone(),
            side,
            price: self.price(side),
            liquidity_cap: self.max_position,
        }
    }

    /// Checks prices are in (0, 1] and the liquidity cap is non-negative.
    ///
    /// # Errors
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<()> {
        for side in [Side::Yes, Side::No] {
            let price = self.price(side);
            if price <= Decimal::ZERO {
                return Err(ArbitrageError::NonPositivePrice {
                    venue: self.venue_id.clone(),
                    side,
                    price,
                });
            }
            if price > Decimal::ONE {
                return Err(ArbitrageError::PriceAboveOne {
                    venue: self.venue_id.clone(),
                    side,
                    price,
                });
            }
        }

        if self.max_position < Decimal::ZERO {
            return Err(ArbitrageError::NegativeMaxPosition {
                venue: self.venue_id.clone(),
                max_position: self.max_position,
            });
        }

        Ok(())
    }
}

// =============================================================================
// Leg
// =============================================================================

/// One side of a complementary strategy: what to buy, where, and how much is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Venue to trade on.
    pub venue: String,
    /// Side to buy.
    pub side: Side,
    /// Quoted price before fees.
    pub price: Decimal,
    /// Maximum dollar notional on this venue.
    pub liquidity_cap: Decimal,
}

impl Leg {
    /// Price including the proportional fee, or `None` if it overflows.
    #[must_use]
    pub fn effective_price(&self, fee_rate: Decimal) -> Option<Decimal> {
        crate::fees::fee_adjusted(self.price, fee_rate)
    }
}
