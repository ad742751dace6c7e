use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use crate::models::portfolio::{ClearPortfolioResponse, Portfolio, StoredPortfolioResponse};
use crate::models::upload::{PortfolioUploadResponse, UploadFile};

/// The portfolio analysis backend, one method per REST endpoint.
///
/// OCR, analysis, risk scoring and recommendations all happen behind this
/// trait; the client only assembles requests and interprets responses.
/// `HttpBackend` is the real implementation, tests plug in mocks.
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    /// `GET /portfolio/sample`
    async fn get_sample_portfolio(&self) -> Result<Portfolio, CoreError>;

    /// `GET /portfolio/stored-portfolio`
    async fn get_stored_portfolio(&self) -> Result<StoredPortfolioResponse, CoreError>;

    /// `POST /portfolio/upload-portfolio` (multipart, single `file` part)
    async fn upload_portfolio(&self, file: &UploadFile) -> Result<PortfolioUploadResponse, CoreError>;

    /// `POST /portfolio/analyze`
    async fn analyze_portfolio(&self, request: &AnalysisRequest) -> Result<AnalysisResult, CoreError>;

    /// `DELETE /portfolio/clear-portfolio`
    async fn clear_portfolio(&self) -> Result<ClearPortfolioResponse, CoreError>;
}
