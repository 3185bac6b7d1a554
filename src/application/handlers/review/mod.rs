//! Review command and query handlers.

mod complete_review;
mod events;
mod get_current_review;
mod get_review_detail;
mod list_history;
mod save_step;
mod start_review;

pub use complete_review::{
    CompleteReviewCommand, CompleteReviewError, CompleteReviewHandler, CompleteReviewResult,
};
pub use events::{
    envelopes_for, ReviewCompletedEvent, ReviewStartedEvent, ReviewStepSavedEvent,
};
pub use get_current_review::{GetCurrentReviewHandler, GetCurrentReviewQuery};
pub use get_review_detail::{GetReviewDetailHandler, GetReviewDetailQuery, ReviewDetailError};
pub use list_history::{ListHistoryHandler, ListHistoryQuery};
pub use save_step::{SaveStepCommand, SaveStepError, SaveStepHandler, SaveStepResult};
pub use start_review::{StartReviewCommand, StartReviewError, StartReviewHandler, StartReviewResult};

use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

/// Loads a review only if `user_id` owns it. Someone else's review is
/// indistinguishable from a missing one.
pub(crate) async fn find_owned_review(
    reviews: &dyn ReviewRepository,
    user_id: &UserId,
    review_id: &ReviewId,
) -> Result<Option<Review>, DomainError> {
    Ok(reviews
        .find_by_id(review_id)
        .await?
        .filter(|review| review.is_owned_by(user_id)))
}
