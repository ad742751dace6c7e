use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration. Every field has a default, so a partial config
/// file (or none at all) is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Backend root, without a trailing slash (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Per-request timeout. `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,

    /// Pause between a successful upload and moving on to the analysis page.
    pub redirect_delay_ms: u64,

    /// How many extracted assets the upload banner lists before truncating.
    pub upload_preview_limit: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: None,
            redirect_delay_ms: 2000,
            upload_preview_limit: 5,
        }
    }
}

impl ClientSettings {
    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
