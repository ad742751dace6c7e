use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single holding: ticker plus quantity.
///
/// Wire shape is `{ "ticker": string, "quantity": number }`.
/// Assets received from the backend are taken as-is; assets entered by the
/// user go through [`Asset::new`], which trims and upper-cases the ticker
/// and rejects non-positive quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker symbol (e.g., "AAPL", "MSFT")
    pub ticker: String,

    /// Number of units held
    pub quantity: f64,
}

impl Asset {
    /// Build a user-entered asset.
    pub fn new(ticker: &str, quantity: f64) -> Result<Self, CoreError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(CoreError::ValidationError("ticker must not be empty".into()));
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "quantity must be a positive number, got {quantity}"
            )));
        }
        Ok(Self {
            ticker: ticker.to_uppercase(),
            quantity,
        })
    }

    /// Parse a quantity typed into a text field.
    ///
    /// Blank input counts as zero and anything that is not a finite
    /// number yields `None`, so both end up rejected by [`Asset::new`].
    #[must_use]
    pub fn parse_quantity(input: &str) -> Option<f64> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }
        trimmed.parse::<f64>().ok().filter(|q| q.is_finite())
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.ticker, self.quantity)
    }
}
