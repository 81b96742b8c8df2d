//! Loading a quote pair from a TOML file.
//!
//! ```toml
//! [[quotes]]
//! event_id = "btc-100k-2024"
//! market_name = "BTC > $100k in 2024"
//! yes_price = "0.09"
//! no_price = "0.94"
//! max_position = "0.9"
//! venue_id = "Kalshi"
//!
//! [[quotes]]
//! # ...second venue
//! ```

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use pairarb_arbitrage_cross::MarketQuote;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct QuoteFile {
    quotes: Vec<MarketQuote>,
}

/// Reads exactly two quotes, in file order.
pub fn load_quote_pair(path: &Path) -> Result<(MarketQuote, MarketQuote)> {
    if !path.exists() {
        bail!("quote file {} not found", path.display());
    }

    let file: QuoteFile = Figment::new()
        .merge(Toml::file(path))
        .extract()
        .with_context(|| format!("failed to parse quotes from {}", path.display()))?;

    let count = file.quotes.len();
    let mut quotes = file.quotes.into_iter();
    match (quotes.next(), quotes.next(), quotes.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => bail!(
            "{} must contain exactly two [[quotes]] entries, found {}",
            path.display(),
            count
        ),
    }
}
