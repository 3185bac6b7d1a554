//! Valid minimal payloads shared by unit tests.

use super::payload::*;
use super::{ReviewDraft, ReviewStep};

pub fn valid_clear_decks() -> ClearDecks {
    let mut inbox = InboxSources::default();
    for source in InboxSource::ALL {
        inbox.set(source, true);
    }
    ClearDecks {
        inbox,
        capture_notes: "x".into(),
    }
}

pub fn valid_commitments() -> Commitments {
    let mut c = Commitments::default();
    c.team_commitments[0].person = "Ana".into();
    c.team_commitments[0].commitment = "Review deck".into();
    c.deliverables[0].name = "Q1 plan".into();
    c.family_commitments[0].person = "Kai".into();
    c.family_commitments[0].need = "Pickup Thursday".into();
    c.budget_admin = "Expenses filed".into();
    c.side_project_notes = "Shipped landing page".into();
    c
}

pub fn valid_look_ahead() -> LookAhead {
    LookAhead {
        calendar_conflicts: "x".into(),
        key_meetings: "x".into(),
        big_three: ["Ship beta".into(), "Finish reviews".into(), "Plan coverage".into()],
    }
}

pub fn valid_protect_time() -> ProtectTime {
    let mut focus_blocks = FocusBlocks::default();
    for block in FocusBlock::ALL {
        focus_blocks.set(block, true);
    }
    ProtectTime {
        focus_blocks,
        time_audit: "x".into(),
    }
}

pub fn valid_reflection() -> Reflection {
    Reflection {
        what_worked: "x".into(),
        what_didnt: "x".into(),
        one_change: "Block Friday mornings".into(),
    }
}

pub fn valid_payload(step: ReviewStep) -> StepPayload {
    match step {
        ReviewStep::ClearDecks => StepPayload::ClearDecks(valid_clear_decks()),
        ReviewStep::Commitments => StepPayload::Commitments(valid_commitments()),
        ReviewStep::LookAhead => StepPayload::LookAhead(valid_look_ahead()),
        ReviewStep::ProtectTime => StepPayload::ProtectTime(valid_protect_time()),
        ReviewStep::Reflect => StepPayload::Reflect(valid_reflection()),
    }
}

pub fn valid_draft() -> ReviewDraft {
    let mut draft = ReviewDraft::default();
    for step in ReviewStep::ALL {
        draft.set(valid_payload(step));
    }
    draft
}
