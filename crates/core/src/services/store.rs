use std::sync::{Arc, RwLock};

use crate::models::asset::Asset;

/// Session-wide slot for the most recently uploaded portfolio.
///
/// A successful upload places its extracted assets here, and the resolver
/// picks them up on the next page mount instead of relying on the backend
/// to have persisted them. Clones share the same slot. Values are replaced
/// wholesale, never edited in place.
#[derive(Debug, Clone, Default)]
pub struct PortfolioStore {
    slot: Arc<RwLock<Option<Arc<Vec<Asset>>>>>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the uploaded portfolio.
    pub fn set(&self, assets: Vec<Asset>) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Arc::new(assets));
    }

    /// The uploaded portfolio, if one is held.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Vec<Asset>>> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current().is_none()
    }
}
