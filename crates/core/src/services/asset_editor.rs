use tracing::debug;

use crate::models::asset::Asset;
use crate::models::portfolio::AssetList;

/// Add/remove operations on the working portfolio.
///
/// Pure logic, no I/O. Invalid input is a silent no-op: nothing is added
/// and no error reaches the user. Duplicate tickers are allowed; they are
/// kept as separate rows.
pub struct AssetEditor;

impl AssetEditor {
    pub fn new() -> Self {
        Self
    }

    /// Append `ticker`/`quantity` at the end. Returns whether it was added.
    pub fn add_asset(&self, list: &mut AssetList, ticker: &str, quantity: f64) -> bool {
        match Asset::new(ticker, quantity) {
            Ok(asset) => {
                let mut next = list.as_slice().to_vec();
                next.push(asset);
                list.replace(next);
                true
            }
            Err(e) => {
                debug!("asset rejected: {}", e);
                false
            }
        }
    }

    /// Same as [`AssetEditor::add_asset`], with the quantity still as typed.
    pub fn add_asset_input(&self, list: &mut AssetList, ticker: &str, quantity: &str) -> bool {
        match Asset::parse_quantity(quantity) {
            Some(q) => self.add_asset(list, ticker, q),
            None => {
                debug!(quantity, "asset rejected: quantity is not a number");
                false
            }
        }
    }

    /// Remove the asset at `index`. Out-of-range indices leave the list untouched.
    pub fn remove_asset(&self, list: &mut AssetList, index: usize) -> Option<Asset> {
        if index >= list.len() {
            debug!(index, len = list.len(), "remove ignored: index out of range");
            return None;
        }
        let mut next = list.as_slice().to_vec();
        let removed = next.remove(index);
        list.replace(next);
        Some(removed)
    }
}

impl Default for AssetEditor {
    fn default() -> Self {
        Self::new()
    }
}
