use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::asset::Asset;
use super::null_as_default;

/// Wire shape of a portfolio: `{ "assets": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub assets: Vec<Asset>,
}

/// Where the working portfolio came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortfolioSource {
    /// Persisted by the backend (`/portfolio/stored-portfolio`)
    Stored,
    /// Handed over in-process by a successful upload
    Uploaded,
    /// Backend-provided default (`/portfolio/sample`)
    Sample,
    /// Both fetches failed, or the stored portfolio was cleared
    Empty,
}

impl PortfolioSource {
    /// True when the assets belong to the user rather than the sample.
    #[must_use]
    pub fn is_user_data(&self) -> bool {
        matches!(self, PortfolioSource::Stored | PortfolioSource::Uploaded)
    }
}

impl std::fmt::Display for PortfolioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioSource::Stored => write!(f, "stored"),
            PortfolioSource::Uploaded => write!(f, "uploaded"),
            PortfolioSource::Sample => write!(f, "sample"),
            PortfolioSource::Empty => write!(f, "empty"),
        }
    }
}

/// The in-memory working portfolio, in insertion order.
///
/// Every edit swaps in a new `Arc<Vec<Asset>>`; snapshots taken earlier
/// keep seeing the sequence they were taken from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetList {
    assets: Arc<Vec<Asset>>,
}

impl AssetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only handle on the current sequence.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Asset>> {
        Arc::clone(&self.assets)
    }

    /// Replace the whole sequence.
    pub fn replace(&mut self, assets: Vec<Asset>) {
        self.assets = Arc::new(assets);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.assets.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Asset] {
        &self.assets
    }

    /// Copy the current sequence into its wire shape.
    #[must_use]
    pub fn to_portfolio(&self) -> Portfolio {
        Portfolio {
            assets: self.assets.as_ref().clone(),
        }
    }
}

impl From<Vec<Asset>> for AssetList {
    fn from(assets: Vec<Asset>) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }
}

/// Response of `GET /portfolio/stored-portfolio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredPortfolioResponse {
    pub assets: Vec<Asset>,

    /// OCR text and processing output kept by the backend; opaque here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<serde_json::Value>,
}

/// Response of `DELETE /portfolio/clear-portfolio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearPortfolioResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
