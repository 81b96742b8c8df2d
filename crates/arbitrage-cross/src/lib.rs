//! Cross-market binary arbitrage detection and sizing.
//!
//! When two venues quote the same YES/NO event and buying YES on one plus NO
//! on the other costs less than $1.00 after fees, the pair pays exactly $1.00
//! whatever happens:
//!
//! ```text
//! Kalshi:     YES @ $0.09,  NO @ $0.94
//! Polymarket: YES @ $0.15,  NO @ $0.86
//!
//!   Buy Kalshi YES     @ $0.09
//!   Buy Polymarket NO  @ $0.86
//!   Total cost:          $0.95
//!   Guaranteed payout:   $1.00
//!   Return:              5.26%
//! ```
//!
//! # Modules
//!
//! - [`types`]: Quotes, sides and legs
//! - [`fees`]: Proportional fee adjustment
//! - [`finder`]: Pick the cheaper complementary strategy and its capacity
//! - [`sizer`]: Fit the opportunity to a bankroll, in cents
//! - [`validator`]: Re-check caps and ROI on the rounded plan
//! - [`pipeline`]: Run the three steps in order
//! - [`report`]: Print or serialize an approved plan
//!
//! # Example
//!
//! ```
//! use pairarb_arbitrage_cross::{find_arbitrage, size_positions, validate_plan, MarketQuote};
//! use rust_decimal_macros::dec;
//!
//! let kalshi = MarketQuote::new(
//!     "btc-100k-2024", "BTC > $100k in 2024", dec!(0.09), dec!(0.94), dec!(0.9), "Kalshi",
//! );
//! let polymarket = MarketQuote::new(
//!     "btc-100k-2024", "BTC > $100k in 2024", dec!(0.15), dec!(0.86), dec!(80.99), "Polymarket",
//! );
//!
//! let opportunity = find_arbitrage(&kalshi, &polymarket, dec!(0), dec!(0.01))?
//!     .expect("0.95 pair cost");
//! let plan = size_positions(&opportunity, dec!(5000), dec!(0), dec!(0.01))?;
//! let (ok, message) = validate_plan(&plan, &opportunity)?.into_parts();
//!
//! assert!(ok);
//! assert_eq!(message, "Valid positions with $0.50 minimum profit (5.26% ROI)");
//! # Ok::<(), pairarb_arbitrage_cross::ArbitrageError>(())
//! ```
//!
//! # Safety
//!
//! Both quotes must describe the same real-world event with identical
//! settlement rules. Mismatched settlement turns a guaranteed payout into a
//! gamble; the finder only checks that the event identifiers agree.

pub mod error;
pub mod fees;
pub mod finder;
pub mod pipeline;
pub mod precision;
pub mod report;
pub mod sizer;
pub mod types;
pub mod validator;

// Re-export main types for convenience
pub use error::{ArbitrageError, Result};
pub use finder::{find_arbitrage, Opportunity, Strategy};
pub use pipeline::{evaluate_pair, Evaluation};
pub use report::{ExecutionReport, FeeAdjustedPrices, LegReport};
pub use sizer::{size_positions, PositionAmount, SizedPlan};
pub use types::{Leg, MarketQuote, Side};
pub use validator::{validate_plan, PlanValidation, ValidationFailure, MIN_ROI_PCT};
