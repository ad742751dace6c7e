use std::sync::Arc;

use tracing::{error, info};

use crate::backend::scope::ViewScope;
use crate::backend::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::portfolio::{AssetList, PortfolioSource};
use crate::models::view::DashboardView;
use crate::services::render_service::RenderService;
use crate::services::resolver_service::PortfolioResolver;
use crate::services::store::PortfolioStore;

/// `/`: portfolio status, asset table, and the clear action.
pub struct DashboardPage {
    scope: ViewScope,
    backend: Arc<dyn PortfolioBackend>,
    store: PortfolioStore,
    assets: AssetList,
    source: PortfolioSource,
    render: RenderService,
}

impl DashboardPage {
    /// Resolve the portfolio and build the page.
    pub async fn mount(
        backend: Arc<dyn PortfolioBackend>,
        store: PortfolioStore,
    ) -> Result<Self, CoreError> {
        let scope = ViewScope::new();
        let resolved = PortfolioResolver::new()
            .resolve(backend.as_ref(), &store, &scope)
            .await?;
        Ok(Self {
            scope,
            backend,
            store,
            assets: resolved.assets,
            source: resolved.source,
            render: RenderService::new(),
        })
    }

    #[must_use]
    pub fn assets(&self) -> &AssetList {
        &self.assets
    }

    #[must_use]
    pub fn source(&self) -> PortfolioSource {
        self.source
    }

    /// "Clear Portfolio" is only offered for the user's own data.
    #[must_use]
    pub fn can_clear(&self) -> bool {
        self.source.is_user_data()
    }

    #[must_use]
    pub fn view(&self) -> DashboardView {
        self.render.dashboard_view(&self.assets, self.source)
    }

    /// Ask the backend to drop the stored portfolio. On success the page
    /// shows an empty, non-stored portfolio; on failure nothing changes.
    /// Returns whether the portfolio was cleared.
    pub async fn clear(&mut self) -> bool {
        if !self.can_clear() {
            return false;
        }
        match self.scope.run(self.backend.clear_portfolio()).await {
            Ok(resp) => {
                info!(message = %resp.message, "portfolio cleared");
                self.store.clear();
                self.assets.replace(Vec::new());
                self.source = PortfolioSource::Empty;
                true
            }
            Err(e) => {
                error!("Error clearing portfolio: {}", e);
                false
            }
        }
    }

    /// Cancel in-flight work without dropping the page.
    pub fn unmount(&self) {
        self.scope.cancel();
    }
}
