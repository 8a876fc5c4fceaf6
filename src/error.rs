//! Error taxonomy for catalog client operations.
//!
//! DESIGN
//! ======
//! Every failure is local to the call that produced it; nothing here is
//! fatal to the process. The only side-effecting path is the unauthorized
//! handler in the client, which clears the token store and then still
//! surfaces [`ApiError::SessionExpired`] to the caller.

use std::collections::BTreeMap;

/// Errors produced by catalog client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input rejected locally before any network call. Keys are field
    /// names, values are human-readable messages.
    #[error("validation failed: {}", fields_summary(errors))]
    Validation { errors: BTreeMap<String, String> },

    /// Login credentials rejected by the token endpoint.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// A non-login call returned 401. The stored token has already been
    /// cleared and a session-invalidated event broadcast by the time the
    /// caller sees this.
    #[error("session expired: stored token rejected by the backend")]
    SessionExpired,

    /// 404 on a by-identifier fetch.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The backend reported a 5xx failure.
    #[error("server error: status {status}: {message}")]
    Server { status: u16, message: String },

    /// The backend rejected the request with another non-success status.
    #[error("request rejected: status {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure, no response received.
    #[error("network error: {0}")]
    Network(String),

    /// A response body could not be deserialized.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The operation has no backend endpoint wired up.
    #[error("{operation} is not available")]
    NotAvailable { operation: &'static str },
}

impl ApiError {
    /// Whether a caller-level retry could plausibly succeed. The client
    /// itself never retries; each call is attempted exactly once.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Server { .. } | Self::Api { status: 429, .. }
        )
    }

    /// Field-keyed messages for validation failures, empty otherwise.
    #[must_use]
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            Self::Validation { errors } => errors.clone(),
            _ => BTreeMap::new(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

fn fields_summary(errors: &BTreeMap<String, String>) -> String {
    let parts: Vec<String> = errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect();
    parts.join("; ")
}

/// Pull a human-readable message out of a FastAPI-style error body.
///
/// Accepts both `{"detail": "..."}` and `{"detail": {"message": "..."}}`;
/// anything else falls back to the raw body, or a placeholder when empty.
pub(crate) fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail") {
            if let Some(text) = detail.as_str() {
                return text.to_string();
            }
            if let Some(text) = detail.get("message").and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        "no error detail provided".to_string()
    } else {
        body.trim().to_string()
    }
}

/// Map a non-success, non-401, non-404 status to the right error variant.
pub(crate) fn classify_status(status: u16, body: &str) -> ApiError {
    let message = extract_detail(body);
    if status >= 500 {
        ApiError::Server { status, message }
    } else {
        ApiError::Api { status, message }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
