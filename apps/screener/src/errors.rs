use serde::Deserialize;
use thiserror::Error;

/// Error type for everything below the view layer.
/// View actions catch these and turn them into failure notices.
#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: serde_json::Value,
}

impl ScreenerError {
    /// Builds an `Api` error from a non-success response body, preferring the
    /// backend's `detail` field over the raw body.
    pub fn from_response(status: u16, body: String) -> Self {
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(ApiErrorBody {
                detail: serde_json::Value::String(s),
            }) => s,
            Ok(ApiErrorBody { detail }) => detail.to_string(),
            Err(_) if body.trim().is_empty() => format!("request failed with status {status}"),
            Err(_) => body,
        };
        ScreenerError::Api { status, message }
    }

    /// Short text suitable for a user-facing notice.
    pub fn detail(&self) -> String {
        match self {
            ScreenerError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
