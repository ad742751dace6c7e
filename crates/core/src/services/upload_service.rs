use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::backend::scope::guarded;
use crate::backend::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::upload::{FilePreview, PortfolioUploadResponse, UploadFile, UploadState, UploadStatus};

/// An upload in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadTicket {
    id: Uuid,
    file: UploadFile,
}

impl UploadTicket {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn file(&self) -> &UploadFile {
        &self.file
    }
}

/// NoFile → FileSelected → Uploading → Succeeded | Failed.
///
/// Type and size are not checked here; the backend decides what it accepts.
/// Picking a new file clears the previous status and orphans any upload
/// still in flight.
#[derive(Debug)]
pub struct UploadOrchestrator {
    state: UploadState,
    file: Option<UploadFile>,
    preview: Option<FilePreview>,
}

impl UploadOrchestrator {
    pub fn new() -> Self {
        Self {
            state: UploadState::NoFile,
            file: None,
            preview: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    #[must_use]
    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&FilePreview> {
        self.preview.as_ref()
    }

    /// Status banner of the last finished upload.
    #[must_use]
    pub fn status(&self) -> Option<&UploadStatus> {
        match &self.state {
            UploadState::Succeeded(s) | UploadState::Failed(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        matches!(self.state, UploadState::Uploading { .. })
    }

    /// Whether the upload button is enabled.
    #[must_use]
    pub fn can_upload(&self) -> bool {
        self.file.is_some() && !self.is_uploading()
    }

    /// Take a file from the picker or a drop. Computes the preview and clears
    /// any previous status.
    pub fn select_file(&mut self, file: UploadFile) {
        let preview = FilePreview::of(&file);
        debug!(file = %file.file_name, mime = preview.mime_type, "file selected");
        self.preview = Some(preview);
        self.file = Some(file);
        self.state = UploadState::FileSelected;
    }

    pub fn begin(&mut self) -> Result<UploadTicket, CoreError> {
        if self.is_uploading() {
            return Err(CoreError::RequestPending);
        }
        let file = self.file.clone().ok_or(CoreError::NoFileSelected)?;
        let ticket = UploadTicket {
            id: Uuid::new_v4(),
            file,
        };
        self.state = UploadState::Uploading { ticket: ticket.id };
        info!(ticket = %ticket.id, file = %ticket.file.file_name, "upload started");
        Ok(ticket)
    }

    /// Record the outcome of `ticket`. Returns the new status, or `None`
    /// when the outcome was discarded.
    pub fn complete(
        &mut self,
        ticket: &UploadTicket,
        outcome: Result<PortfolioUploadResponse, CoreError>,
    ) -> Option<&UploadStatus> {
        match &self.state {
            UploadState::Uploading { ticket: current } if *current == ticket.id => {}
            _ => {
                debug!(ticket = %ticket.id, "stale upload outcome discarded");
                return None;
            }
        }

        match outcome {
            Ok(data) => {
                info!(assets = data.assets.len(), "upload succeeded");
                self.state = UploadState::Succeeded(UploadStatus::succeeded(data));
            }
            Err(CoreError::Cancelled) => {
                self.state = UploadState::FileSelected;
                return None;
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.state = UploadState::Failed(UploadStatus::failed(&e.user_message()));
            }
        }
        self.status()
    }
}

impl Default for UploadOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Send the ticket's file, unless `token` is cancelled first.
pub async fn run_upload(
    backend: &dyn PortfolioBackend,
    token: &CancellationToken,
    ticket: &UploadTicket,
) -> Result<PortfolioUploadResponse, CoreError> {
    guarded(token, backend.upload_portfolio(ticket.file())).await
}
