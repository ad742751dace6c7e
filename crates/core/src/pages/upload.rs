use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{Redirect, Route};
use crate::backend::scope::ViewScope;
use crate::backend::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::settings::ClientSettings;
use crate::models::upload::{FilePreview, PortfolioUploadResponse, UploadFile, UploadState, UploadStatus};
use crate::models::view::UploadSummary;
use crate::services::render_service::RenderService;
use crate::services::store::PortfolioStore;
use crate::services::upload_service::{run_upload, UploadOrchestrator, UploadTicket};

/// `/upload`: pick a statement image or PDF and let the backend extract it.
pub struct UploadPage {
    scope: ViewScope,
    backend: Arc<dyn PortfolioBackend>,
    store: PortfolioStore,
    orchestrator: UploadOrchestrator,
    render: RenderService,
    redirect_delay: std::time::Duration,
    preview_limit: usize,
}

impl UploadPage {
    pub fn mount(
        backend: Arc<dyn PortfolioBackend>,
        store: PortfolioStore,
        settings: &ClientSettings,
    ) -> Self {
        Self {
            scope: ViewScope::new(),
            backend,
            store,
            orchestrator: UploadOrchestrator::new(),
            render: RenderService::new(),
            redirect_delay: settings.redirect_delay(),
            preview_limit: settings.upload_preview_limit,
        }
    }

    pub fn select_file(&mut self, file: UploadFile) {
        self.orchestrator.select_file(file);
    }

    #[must_use]
    pub fn preview(&self) -> Option<&FilePreview> {
        self.orchestrator.preview()
    }

    /// "name" plus size, or the drop-zone prompt when nothing is picked.
    #[must_use]
    pub fn file_label(&self) -> (String, String) {
        match self.orchestrator.file() {
            Some(file) => (file.file_name.clone(), file.size_label()),
            None => (
                "Drag & drop or click to upload".to_string(),
                "Max file size: 10MB".to_string(),
            ),
        }
    }

    #[must_use]
    pub fn state(&self) -> &UploadState {
        self.orchestrator.state()
    }

    #[must_use]
    pub fn can_upload(&self) -> bool {
        self.orchestrator.can_upload()
    }

    pub fn begin_upload(&mut self) -> Result<UploadTicket, CoreError> {
        self.orchestrator.begin()
    }

    /// Record an outcome. On success a redirect to `/analysis` is returned,
    /// and the extracted assets are handed to the shared store unless the
    /// backend found none.
    pub fn finish_upload(
        &mut self,
        ticket: &UploadTicket,
        outcome: Result<PortfolioUploadResponse, CoreError>,
    ) -> Option<Redirect> {
        let status = self.orchestrator.complete(ticket, outcome)?;
        if !status.success {
            return None;
        }
        if !status.assets().is_empty() {
            self.store.set(status.assets().to_vec());
        }
        Some(Redirect {
            to: Route::Analysis,
            after: self.redirect_delay,
        })
    }

    #[must_use]
    pub fn dispatcher(&self) -> (Arc<dyn PortfolioBackend>, CancellationToken) {
        (Arc::clone(&self.backend), self.scope.token())
    }

    /// Begin, send, and record the outcome in one go.
    pub async fn upload(&mut self) -> Result<Option<Redirect>, CoreError> {
        let ticket = self.begin_upload()?;
        let outcome = run_upload(self.backend.as_ref(), &self.scope.token(), &ticket).await;
        Ok(self.finish_upload(&ticket, outcome))
    }

    #[must_use]
    pub fn status(&self) -> Option<&UploadStatus> {
        self.orchestrator.status()
    }

    #[must_use]
    pub fn summary(&self) -> Option<UploadSummary> {
        self.orchestrator
            .status()
            .map(|status| self.render.upload_summary(status, self.preview_limit))
    }

    pub fn unmount(&self) {
        self.scope.cancel();
    }
}
