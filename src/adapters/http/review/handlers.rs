//! HTTP handlers for review endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    CompleteReviewCommand, CompleteReviewHandler, GetCurrentReviewHandler, GetCurrentReviewQuery,
    GetReviewDetailHandler, GetReviewDetailQuery, SaveStepCommand, SaveStepHandler,
    StartReviewCommand, StartReviewHandler,
};
use crate::domain::foundation::{ReviewId, Timestamp};
use crate::domain::review::{validate_step, ReviewStep, StepPayload};

use super::dto::{
    CompleteReviewResponse, ReviewResponse, SaveStepRequest, SaveStepResponse,
    StartReviewResponse, ValidationResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReviewHandlers {
    start: Arc<StartReviewHandler>,
    current: Arc<GetCurrentReviewHandler>,
    detail: Arc<GetReviewDetailHandler>,
    save_step: Arc<SaveStepHandler>,
    complete: Arc<CompleteReviewHandler>,
}

impl ReviewHandlers {
    pub fn new(
        start: Arc<StartReviewHandler>,
        current: Arc<GetCurrentReviewHandler>,
        detail: Arc<GetReviewDetailHandler>,
        save_step: Arc<SaveStepHandler>,
        complete: Arc<CompleteReviewHandler>,
    ) -> Self {
        Self {
            start,
            current,
            detail,
            save_step,
            complete,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/reviews/current - Start or resume this week's review
pub async fn start_review(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let result = handlers
        .start
        .handle(StartReviewCommand {
            user_id: user.id,
            now: Timestamp::now(),
        })
        .await?;

    let status = if result.resumed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let body = StartReviewResponse {
        review: ReviewResponse::from(&result.review),
        resumed: result.resumed,
    };
    Ok((status, Json(body)).into_response())
}

/// GET /api/reviews/current - This week's review, if started
pub async fn get_current_review(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review = handlers
        .current
        .handle(GetCurrentReviewQuery {
            user_id: user.id,
            today: Timestamp::now().date(),
        })
        .await?
        .ok_or_else(|| ApiError::review_not_found(None))?;

    Ok(Json(ReviewResponse::from(&review)))
}

/// GET /api/reviews/:id - Review detail
pub async fn get_review(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path(review_id): Path<String>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review = handlers
        .detail
        .handle(GetReviewDetailQuery {
            user_id: user.id,
            review_id: parse_review_id(&review_id)?,
        })
        .await?;

    Ok(Json(ReviewResponse::from(&review)))
}

/// POST /api/reviews/:id/steps/:step/validate - Live validation of a step
pub async fn validate_review_step(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path((review_id, step)): Path<(String, u8)>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<ValidationResponse>, ApiError> {
    // Foreign or unknown reviews get the same 404 as the other routes.
    handlers
        .detail
        .handle(GetReviewDetailQuery {
            user_id: user.id,
            review_id: parse_review_id(&review_id)?,
        })
        .await?;

    let payload = StepPayload::from_json(parse_step(step)?, payload)?;
    Ok(Json(validate_step(&payload).into()))
}

/// POST /api/reviews/:id/steps/:step - Save a step; the last step completes
/// the review
pub async fn save_review_step(
    State(handlers): State<ReviewHandlers>,
    RequireAuth(user): RequireAuth,
    Path((review_id, step)): Path<(String, u8)>,
    Json(req): Json<SaveStepRequest>,
) -> Result<Response, ApiError> {
    let review_id = parse_review_id(&review_id)?;
    let step = parse_step(step)?;
    let payload = StepPayload::from_json(step, req.payload)?;

    if let StepPayload::Reflect(reflection) = payload {
        let result = handlers
            .complete
            .handle(CompleteReviewCommand {
                user_id: user.id,
                review_id,
                reflection,
                time_spent_seconds: req.time_spent_seconds,
                now: Timestamp::now(),
            })
            .await?;

        let body = CompleteReviewResponse {
            review: ReviewResponse::from(&result.review),
            outcome: result.outcome,
        };
        return Ok(Json(body).into_response());
    }

    let result = handlers
        .save_step
        .handle(SaveStepCommand {
            user_id: user.id,
            review_id,
            payload,
        })
        .await?;

    let body = SaveStepResponse {
        review: ReviewResponse::from(&result.review),
        saved_step: result.step.number(),
        next_step: result.step.next().map(ReviewStep::number),
        changed: result.changed,
    };
    Ok(Json(body).into_response())
}

fn parse_review_id(raw: &str) -> Result<ReviewId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid review ID"))
}

fn parse_step(number: u8) -> Result<ReviewStep, ApiError> {
    Ok(ReviewStep::from_number(number)?)
}
