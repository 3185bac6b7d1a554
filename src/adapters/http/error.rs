//! Mapping from application errors to HTTP responses.
//!
//! Every handler error converts into `ApiError`, which renders as
//! `{ code, message, details?, retryable? }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::application::{
    CompleteReviewError, PersistenceFailure, ReviewDetailError, SaveStepError, StartReviewError,
    UpdateSettingsError,
};
use crate::domain::foundation::{DomainError, ErrorCode, ReviewId, ValidationError};
use crate::domain::review::{FieldIssue, ReviewStep};

/// Banner text for a save that did not go through.
pub const SAVE_FAILED_MESSAGE: &str = "Couldn't save your progress. Please try again.";

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.into(),
                message: message.into(),
                details: None,
                retryable: None,
            },
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.body.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn review_not_found(id: Option<ReviewId>) -> Self {
        let message = match id {
            Some(id) => format!("Review not found: {id}"),
            None => "No review for this week yet".to_string(),
        };
        Self::new(StatusCode::NOT_FOUND, ErrorCode::ReviewNotFound.to_string(), message)
    }

    /// 422 carrying the field issues of the step.
    pub fn step_incomplete(step: ReviewStep, issues: Vec<FieldIssue>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::StepIncomplete.to_string(),
            format!("{step} is incomplete"),
        )
        .with_details(json!({ "step": step.number(), "issues": issues }))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::StepIncomplete => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ReviewNotFound | ErrorCode::StreakNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::ReviewAlreadyExists
        | ErrorCode::ReviewCompleted
        | ErrorCode::StepNotReached => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::DatabaseError | ErrorCode::StorageTimeout => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status = status_for(error.code);
        if status.is_server_error() {
            tracing::error!(code = %error.code, error = %error.message, "request failed");
        }
        let mut api = Self::new(status, error.code.to_string(), error.message);
        if error.code.is_transient() {
            api.body.retryable = Some(true);
        }
        if !error.details.is_empty() {
            api.body.details = Some(json!(error.details));
        }
        api
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ValidationFailed.to_string(),
            error.to_string(),
        )
    }
}

impl From<PersistenceFailure> for ApiError {
    fn from(failure: PersistenceFailure) -> Self {
        if !failure.is_retryable() {
            return failure.last_error.into();
        }
        let mut api = Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            failure.last_error.code.to_string(),
            SAVE_FAILED_MESSAGE,
        )
        .with_details(json!({ "operation": failure.operation, "attempts": failure.attempts }));
        api.body.retryable = Some(true);
        api
    }
}

impl From<StartReviewError> for ApiError {
    fn from(error: StartReviewError) -> Self {
        match error {
            StartReviewError::Persistence(failure) => failure.into(),
            StartReviewError::Domain(error) => error.into(),
        }
    }
}

impl From<SaveStepError> for ApiError {
    fn from(error: SaveStepError) -> Self {
        match error {
            SaveStepError::NotFound(id) => Self::review_not_found(Some(id)),
            SaveStepError::Invalid { step, issues } => Self::step_incomplete(step, issues),
            SaveStepError::Persistence(failure) => failure.into(),
            SaveStepError::Domain(error) => error.into(),
        }
    }
}

impl From<CompleteReviewError> for ApiError {
    fn from(error: CompleteReviewError) -> Self {
        match error {
            CompleteReviewError::NotFound(id) => Self::review_not_found(Some(id)),
            CompleteReviewError::Invalid { step, issues } => Self::step_incomplete(step, issues),
            CompleteReviewError::Persistence(failure) => failure.into(),
            CompleteReviewError::Domain(error) => error.into(),
        }
    }
}

impl From<ReviewDetailError> for ApiError {
    fn from(error: ReviewDetailError) -> Self {
        match error {
            ReviewDetailError::NotFound(id) => Self::review_not_found(Some(id)),
            ReviewDetailError::Domain(error) => error.into(),
        }
    }
}

impl From<UpdateSettingsError> for ApiError {
    fn from(error: UpdateSettingsError) -> Self {
        match error {
            UpdateSettingsError::Invalid(error) => error.into(),
            UpdateSettingsError::Persistence(failure) => failure.into(),
        }
    }
}
