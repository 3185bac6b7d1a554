//! Domain error types.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// A value that failed its constructor's checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyField { field: String },

    #[error("{field} must be {min}..={max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("{field}: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Machine-readable failure category. Rendered as `SCREAMING_SNAKE_CASE`
/// in API bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    StepIncomplete,
    ReviewNotFound,
    StreakNotFound,
    InvalidStateTransition,
    ReviewAlreadyExists,
    ReviewCompleted,
    StepNotReached,
    Unauthorized,
    Forbidden,
    DatabaseError,
    StorageTimeout,
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::StepIncomplete => "STEP_INCOMPLETE",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::StreakNotFound => "STREAK_NOT_FOUND",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::ReviewAlreadyExists => "REVIEW_ALREADY_EXISTS",
            Self::ReviewCompleted => "REVIEW_COMPLETED",
            Self::StepNotReached => "STEP_NOT_REACHED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StorageTimeout => "STORAGE_TIMEOUT",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Storage hiccups; the same write may succeed on retry.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::DatabaseError | Self::StorageTimeout)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    /// Extra context surfaced in API error bodies.
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn is_transient(&self) -> bool {
        self.code.is_transient()
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
