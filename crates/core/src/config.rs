use anyhow::{bail, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub arbitrage: ArbitrageConfig,
    pub logging: LoggingConfig,
}

/// Thresholds and capital passed explicitly into every pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrageConfig {
    /// Proportional fee applied to every price (0.02 = 2%).
    pub fee_rate: Decimal,
    /// Minimum return per dollar invested (0.01 = 1%).
    pub min_return: Decimal,
    /// Capital available for one opportunity, in dollars.
    pub bankroll: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            fee_rate: dec!(0.00),
            min_return: dec!(0.01),
            bankroll: dec!(5000),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ArbitrageConfig {
    /// Sets the fee rate.
    #[must_use]
    pub fn with_fee_rate(mut self, fee_rate: Decimal) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    /// Sets the minimum return.
    #[must_use]
    pub fn with_min_return(mut self, min_return: Decimal) -> Self {
        self.min_return = min_return;
        self
    }

    /// Sets the bankroll.
    #[must_use]
    pub fn with_bankroll(mut self, bankroll: Decimal) -> Self {
        self.bankroll = bankroll;
        self
    }

    /// Rejects negative values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first negative field.
    pub fn validate(&self) -> Result<()> {
        if self.fee_rate < Decimal::ZERO {
            bail!("fee_rate must be non-negative, got {}", self.fee_rate);
        }
        if self.min_return < Decimal::ZERO {
            bail!("min_return must be non-negative, got {}", self.min_return);
        }
        if self.bankroll < Decimal::ZERO {
            bail!("bankroll must be non-negative, got {}", self.bankroll);
        }
        Ok(())
    }
}
