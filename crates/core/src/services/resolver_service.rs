use tracing::{debug, error, info, warn};

use crate::backend::scope::ViewScope;
use crate::backend::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::portfolio::{AssetList, PortfolioSource};
use crate::services::store::PortfolioStore;

/// A page's starting portfolio and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPortfolio {
    pub assets: AssetList,
    pub source: PortfolioSource,
}

impl ResolvedPortfolio {
    fn empty() -> Self {
        Self {
            assets: AssetList::new(),
            source: PortfolioSource::Empty,
        }
    }
}

/// Decides which portfolio a page starts from.
///
/// Chain, each step at most once, no retries:
/// 1. a non-empty upload handed over in this session (`PortfolioStore`)
/// 2. `GET /portfolio/stored-portfolio`
/// 3. `GET /portfolio/sample`
/// 4. empty
///
/// Backend failures are logged and fall through to the next step. Only
/// cancellation of the page's scope is returned as an error.
pub struct PortfolioResolver;

impl PortfolioResolver {
    pub fn new() -> Self {
        Self
    }

    pub async fn resolve(
        &self,
        backend: &dyn PortfolioBackend,
        store: &PortfolioStore,
        scope: &ViewScope,
    ) -> Result<ResolvedPortfolio, CoreError> {
        if let Some(uploaded) = store.current().filter(|assets| !assets.is_empty()) {
            debug!(assets = uploaded.len(), "using portfolio handed over by upload");
            return Ok(ResolvedPortfolio {
                assets: AssetList::from(uploaded.as_ref().clone()),
                source: PortfolioSource::Uploaded,
            });
        }

        match scope.run(backend.get_stored_portfolio()).await {
            Ok(stored) => {
                info!(assets = stored.assets.len(), "loaded stored portfolio");
                return Ok(ResolvedPortfolio {
                    assets: AssetList::from(stored.assets),
                    source: PortfolioSource::Stored,
                });
            }
            Err(CoreError::Cancelled) => return Err(CoreError::Cancelled),
            Err(e) => warn!("No stored portfolio found, using sample data: {}", e),
        }

        match scope.run(backend.get_sample_portfolio()).await {
            Ok(sample) => {
                info!(assets = sample.assets.len(), "loaded sample portfolio");
                Ok(ResolvedPortfolio {
                    assets: AssetList::from(sample.assets),
                    source: PortfolioSource::Sample,
                    })
            }
            Err(CoreError::Cancelled) => Err(CoreError::Cancelled),
            Err(e) => {
                error!("Error fetching sample portfolio: {}", e);
                Ok(ResolvedPortfolio::empty())
            }
        }
    }
}

impl Default for PortfolioResolver {
    fn default() -> Self {
        Self::new()
    }
}
