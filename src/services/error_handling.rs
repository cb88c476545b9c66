use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Message shown for any request that ran out of time.
pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";

/// Every failure a board action can produce.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Request to {endpoint} timed out after {}ms", .timeout.as_millis())]
    Timeout { endpoint: String, timeout: Duration },

    #[error("Network failure calling {endpoint}: {message}")]
    NetworkFailure { endpoint: String, message: String },

    #[error("Server responded with status {status} for {endpoint}")]
    ServerError {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("{message}")]
    ValidationFailure { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Flat discriminant of [`BoardError`], handy for matching in notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    NetworkFailure,
    ServerError,
    MalformedResponse,
    ValidationFailure,
    Configuration,
}

impl BoardError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BoardError::ValidationFailure {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::Timeout { .. } => ErrorKind::Timeout,
            BoardError::NetworkFailure { .. } => ErrorKind::NetworkFailure,
            BoardError::ServerError { .. } => ErrorKind::ServerError,
            BoardError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            BoardError::ValidationFailure { .. } => ErrorKind::ValidationFailure,
            BoardError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BoardError::Timeout { .. })
    }

    /// True for a 404 from the backend.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::ServerError { status: 404, .. })
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            BoardError::Timeout { endpoint, .. }
            | BoardError::NetworkFailure { endpoint, .. }
            | BoardError::ServerError { endpoint, .. }
            | BoardError::MalformedResponse { endpoint, .. } => Some(endpoint),
            BoardError::ValidationFailure { .. } | BoardError::Configuration { .. } => None,
        }
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    pub fn log_request_failure(action: &str, error: &BoardError) {
        warn!(
            action = %action,
            kind = ?error.kind(),
            endpoint = error.endpoint().unwrap_or("-"),
            error = %error,
            "Board action failed"
        );
    }

    pub fn log_validation_failure(field: &str, message: &str) {
        warn!(
            field = %field,
            message = %message,
            "Validation failed"
        );
    }

    pub fn log_completed_request(endpoint: &str, status: u16, elapsed: Duration, threshold: Duration) {
        if elapsed > threshold {
            warn!(
                endpoint = %endpoint,
                status = status,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = threshold.as_millis() as u64,
                "Request exceeded half of its timeout"
            );
        } else {
            debug!(
                endpoint = %endpoint,
                status = status,
                elapsed_ms = elapsed.as_millis() as u64,
                "Request completed"
            );
        }
    }
}

/// User-facing wording for errors.
pub struct UserErrorFormatter;

impl UserErrorFormatter {
    /// Timeouts and validation failures carry their own wording; everything
    /// else collapses into the action's `fallback` text.
    pub fn format_for_ui(error: &BoardError, fallback: &str) -> String {
        match error {
            BoardError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
            BoardError::ValidationFailure { message, .. } => message.clone(),
            BoardError::Configuration { message } => format!("Configuration error: {}", message),
            BoardError::NetworkFailure { .. }
            | BoardError::ServerError { .. }
            | BoardError::MalformedResponse { .. } => fallback.to_string(),
        }
    }
}
