//! TED error types.

use thiserror::Error;

/// Errors raised by the TED services and repositories.
///
/// Everything here surfaces to the HTTP layer as a 400 response with the
/// notification-list envelope; `code()` labels errors for structured logs.
#[derive(Error, Debug)]
pub enum TedError {
    // === Validation ===
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    // === Lookup / state guards ===
    #[error("no TED found for the given id")]
    NotFound,

    #[error("TED has already been approved")]
    AlreadyApproved,

    #[error("TED can no longer be approved")]
    CannotApprove,

    #[error("TED has already been rejected")]
    AlreadyDisapproved,

    #[error("TED can no longer be rejected")]
    CannotDisapprove,

    #[error("TED has already been canceled")]
    AlreadyCanceled,

    #[error("TED can no longer be canceled")]
    CannotCancel,

    // === Configuration ===
    #[error("TED limits are not configured")]
    LimitNotConfigured,

    // === System ===
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("settlement system error: {0}")]
    Upstream(String),
}

impl TedError {
    /// Build a validation error from a collected message list.
    pub fn validation(messages: Vec<String>) -> Self {
        TedError::Validation(messages)
    }

    /// Error code for structured logging
    pub fn code(&self) -> &'static str {
        match self {
            TedError::Validation(_) => "VALIDATION",
            TedError::NotFound => "NOT_FOUND",
            TedError::AlreadyApproved => "ALREADY_APPROVED",
            TedError::CannotApprove => "CANNOT_APPROVE",
            TedError::AlreadyDisapproved => "ALREADY_DISAPPROVED",
            TedError::CannotDisapprove => "CANNOT_DISAPPROVE",
            TedError::AlreadyCanceled => "ALREADY_CANCELED",
            TedError::CannotCancel => "CANNOT_CANCEL",
            TedError::LimitNotConfigured => "LIMIT_NOT_CONFIGURED",
            TedError::Database(_) => "DATABASE_ERROR",
            TedError::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    /// Human-readable messages for the notification envelope.
    ///
    /// Validation errors carry one message per violated rule; everything
    /// else collapses to its display form.
    pub fn messages(&self) -> Vec<String> {
        match self {
            TedError::Validation(msgs) => msgs.clone(),
            other => vec![other.to_string()],
        }
    }

    /// True when the error came from input validation (its own envelope
    /// message, one notification per rule).
    pub fn is_validation(&self) -> bool {
        matches!(self, TedError::Validation(_))
    }
}
