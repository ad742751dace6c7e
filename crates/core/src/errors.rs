use thiserror::Error;

/// Fallback text when neither the server nor the transport produced a message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Unified error type for the entire portfolio-advisor-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    /// The backend answered with a non-success status.
    /// `detail` is the server-supplied explanation, when the body carried one.
    #[error("{message}")]
    Server {
        status: u16,
        detail: Option<String>,
        message: String,
    },

    /// No usable response (connection refused, DNS, TLS, timeout...).
    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O ────────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Client workflow ─────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Portfolio is empty, nothing to analyze")]
    EmptyPortfolio,

    #[error("A request is already in progress")]
    RequestPending,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Request cancelled: the view that issued it is gone")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Human-readable reason for a failed backend call.
    ///
    /// Prefers the server-supplied `detail`, then the transport message,
    /// then [`UNKNOWN_ERROR`].
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            CoreError::Server {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            CoreError::Server { message, .. } => message.clone(),
            CoreError::Network(msg) => msg.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }

    /// HTTP status of a server-reported failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return CoreError::Deserialization(sanitize_url_message(&e.to_string()));
        }
        CoreError::Network(sanitize_url_message(&e.to_string()))
    }
}

/// Strip query parameters from URLs embedded in transport errors.
pub(crate) fn sanitize_url_message(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_messages() {
        assert_eq!(sanitize_url_message("connection refused"), "connection refused");
    }

    #[test]
    fn sanitize_redacts_query() {
        assert_eq!(
            sanitize_url_message("error sending request for url (http://h/p?key=1)"),
            "error sending request for url (http://h/p?<query redacted>"
        );
    }
}
