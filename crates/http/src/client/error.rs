//! Errors surfaced by the console client
//!
//! Only `dispatch` transport failures and `execute` status mapping produce
//! these; CSRF token lookup never fails a request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got an answer: connection refused, DNS, timeout,
    /// or a body that could not be read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any other non-success status from the console API
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// 401: the console session expired or was never established
    #[error("Session expired or missing: {0}")]
    AuthenticationFailed(String),

    /// 404: unknown app, card or hook
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 400: the API rejected the submitted form
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 403: usually a missing or stale CSRF token
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A response body that is not the expected JSON
    #[error("Unexpected response body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unusable base URL or CSRF header name
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Map a non-success console API status onto an error
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<ClientError> for verify_core::Error {
    fn from(error: ClientError) -> Self {
        Self::SessionQuery(error.to_string())
    }
}
