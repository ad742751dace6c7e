//! reqwest-backed client for the portfolio analysis REST API

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use super::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use crate::models::portfolio::{ClearPortfolioResponse, Portfolio, StoredPortfolioResponse};
use crate::models::settings::ClientSettings;
use crate::models::upload::{PortfolioUploadResponse, UploadFile};

const SAMPLE_PATH: &str = "/portfolio/sample";
const STORED_PATH: &str = "/portfolio/stored-portfolio";
const UPLOAD_PATH: &str = "/portfolio/upload-portfolio";
const ANALYZE_PATH: &str = "/portfolio/analyze";
const CLEAR_PATH: &str = "/portfolio/clear-portfolio";

/// HTTP implementation of [`PortfolioBackend`].
///
/// - No authentication, no API versioning.
/// - No retries: every failure is returned to the caller as-is.
/// - No timeout unless `request_timeout_secs` is configured.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(settings: &ClientSettings) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, CoreError> {
        let response = check_status(response).await?;
        response.json::<T>().await.map_err(|e| {
            error!("Failed to parse {} response: {}", what, e);
            CoreError::Deserialization(format!("Failed to parse {what} response: {e}"))
        })
    }
}

/// Turn a non-success response into `CoreError::Server`, keeping the
/// backend's `detail` when the body has one.
async fn check_status(response: Response) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    debug!(status = status.as_u16(), ?detail, "backend returned an error status");
    Err(CoreError::Server {
        status: status.as_u16(),
        detail,
        message: format!("Request failed with status code {}", status.as_u16()),
    })
}

/// Pull a readable `detail` out of an error body.
///
/// Accepts the plain `{"detail": "..."}` form and the validation-error form
/// where `detail` is a list of objects with a `msg` field.
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

#[async_trait]
impl PortfolioBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn get_sample_portfolio(&self) -> Result<Portfolio, CoreError> {
        let url = self.endpoint(SAMPLE_PATH);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, "sample portfolio").await
    }

    #[instrument(skip(self))]
    async fn get_stored_portfolio(&self) -> Result<StoredPortfolioResponse, CoreError> {
        let url = self.endpoint(STORED_PATH);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, "stored portfolio").await
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name, bytes = file.bytes.len()))]
    async fn upload_portfolio(&self, file: &UploadFile) -> Result<PortfolioUploadResponse, CoreError> {
        let url = self.endpoint(UPLOAD_PATH);
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type())
            .map_err(|e| CoreError::Serialization(format!("Invalid upload part: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        debug!("POST {} ({})", url, file.mime_type());
        let response = self.client.post(&url).multipart(form).send().await?;
        Self::read_json(response, "upload").await
    }

    #[instrument(skip(self, request), fields(assets = request.portfolio.assets.len()))]
    async fn analyze_portfolio(&self, request: &AnalysisRequest) -> Result<AnalysisResult, CoreError> {
        let url = self.endpoint(ANALYZE_PATH);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(request).send().await?;
        Self::read_json(response, "analysis").await
    }

    #[instrument(skip(self))]
    async fn clear_portfolio(&self) -> Result<ClearPortfolioResponse, CoreError> {
        let url = self.endpoint(CLEAR_PATH);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::read_json(response, "clear portfolio").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let settings = ClientSettings {
            base_url: "http://localhost:3000/".into(),
            ..ClientSettings::default()
        };
        let backend = HttpBackend::new(&settings).unwrap();
        assert_eq!(
            backend.endpoint(ANALYZE_PATH),
            "http://localhost:3000/portfolio/analyze"
        );
    }

    #[test]
    fn detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail": "bad ticker"}"#).as_deref(),
            Some("bad ticker")
        );
    }

    #[test]
    fn detail_validation_list() {
        let body = r#"{"detail": [{"loc": ["body"], "msg": "field required"}, {"msg": "bad value"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("field required; bad value")
        );
    }

    #[test]
    fn detail_missing_or_unusable() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": ""}"#), None);
        assert_eq!(extract_detail(r#"{"detail": 42}"#), None);
    }
}
