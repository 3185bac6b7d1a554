//! Weekly review: step catalogue, payloads, validator, aggregate, history.

mod aggregate;
mod events;
mod history;
mod payload;
mod step;
mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::Review;
pub use events::ReviewEvent;
pub use history::{build_history, HistoryEntry, HistoryFilter, HistoryPage, HistoryQuery, HistoryStatus};
pub use payload::{
    ClearDecks, CommitmentList, CommitmentStatus, Commitments, Deliverable, DeliverableStatus,
    FamilyCommitment, FocusBlock, FocusBlocks, InboxSource, InboxSources, LookAhead, ProtectTime,
    Reflection, ReviewDraft, StepPayload, TeamCommitment,
};
pub use step::{ReviewStep, StepInfo};
pub use validation::{is_step_valid, validate_step, FieldIssue, StepValidation};
