pub mod backend;
pub mod errors;
pub mod models;
pub mod pages;
pub mod services;

use std::sync::Arc;

use backend::http::HttpBackend;
use backend::traits::PortfolioBackend;
use errors::CoreError;
use models::settings::ClientSettings;
use pages::{AnalysisPage, DashboardPage, Redirect, Route, UploadPage};
use services::store::PortfolioStore;

/// A mounted page.
pub enum Page {
    Dashboard(DashboardPage),
    Upload(UploadPage),
    Analysis(AnalysisPage),
}

impl Page {
    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            Page::Dashboard(_) => Route::Dashboard,
            Page::Upload(_) => Route::Upload,
            Page::Analysis(_) => Route::Analysis,
        }
    }
}

/// Main entry point for the portfolio-advisor client.
/// Holds the backend connection, settings, and the session's shared
/// portfolio store, and mounts pages on demand.
#[must_use]
pub struct PortfolioAdvisor {
    backend: Arc<dyn PortfolioBackend>,
    settings: ClientSettings,
    store: PortfolioStore,
}

impl std::fmt::Debug for PortfolioAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioAdvisor")
            .field("settings", &self.settings)
            .field("has_uploaded_portfolio", &!self.store.is_empty())
            .finish()
    }
}

impl PortfolioAdvisor {
    /// Connect to the backend at `settings.base_url` over HTTP.
    pub fn new(settings: ClientSettings) -> Result<Self, CoreError> {
        let backend = HttpBackend::new(&settings)?;
        Ok(Self::with_backend(Arc::new(backend), settings))
    }

    /// Use any backend implementation (mocks in tests).
    pub fn with_backend(backend: Arc<dyn PortfolioBackend>, settings: ClientSettings) -> Self {
        Self {
            backend,
            settings,
            store: PortfolioStore::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &PortfolioStore {
        &self.store
    }

    // ── Pages ───────────────────────────────────────────────────────

    pub async fn open_dashboard(&self) -> Result<DashboardPage, CoreError> {
        DashboardPage::mount(Arc::clone(&self.backend), self.store.clone()).await
    }

    pub async fn open_analysis(&self) -> Result<AnalysisPage, CoreError> {
        AnalysisPage::mount(Arc::clone(&self.backend), self.store.clone()).await
    }

    pub fn open_upload(&self) -> UploadPage {
        UploadPage::mount(Arc::clone(&self.backend), self.store.clone(), &self.settings)
    }

    /// Mount the page for `route`.
    pub async fn open(&self, route: Route) -> Result<Page, CoreError> {
        Ok(match route {
            Route::Dashboard => Page::Dashboard(self.open_dashboard().await?),
            Route::Upload => Page::Upload(self.open_upload()),
            Route::Analysis => Page::Analysis(self.open_analysis().await?),
        })
    }

    /// Wait out the redirect delay, then mount its target.
    pub async fn follow(&self, redirect: Redirect) -> Result<Page, CoreError> {
        tokio::time::sleep(redirect.after).await;
        self.open(redirect.to).await
    }
}
