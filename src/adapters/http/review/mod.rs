//! HTTP adapter for review endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CompleteReviewResponse, ReviewResponse, SaveStepRequest, SaveStepResponse,
    StartReviewResponse, ValidationResponse,
};
pub use handlers::ReviewHandlers;
pub use routes::review_routes;
