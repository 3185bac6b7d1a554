//! Inputs to the wizard reducer.

use chrono::NaiveDate;

use crate::domain::review::{
    CommitmentList, CommitmentStatus, DeliverableStatus, FocusBlock, InboxSource, ReviewDraft,
    ReviewStep,
};

/// A single edit to one field of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    // Step 1
    Inbox(InboxSource, bool),
    CaptureNotes(String),

    // Step 2
    AddRow(CommitmentList),
    RemoveRow(CommitmentList, usize),
    TeamPerson(usize, String),
    TeamCommitmentText(usize, String),
    TeamStatus(usize, CommitmentStatus),
    DeliverableName(usize, String),
    DeliverableDueDate(usize, Option<NaiveDate>),
    DeliverableState(usize, DeliverableStatus),
    FamilyPerson(usize, String),
    FamilyNeed(usize, String),
    BudgetAdmin(String),
    SideProjectNotes(String),

    // Step 3
    CalendarConflicts(String),
    KeyMeetings(String),
    BigThree(usize, String),

    // Step 4
    FocusBlockScheduled(FocusBlock, bool),
    TimeAudit(String),

    // Step 5
    WhatWorked(String),
    WhatDidnt(String),
    OneChange(String),
}

impl FieldEdit {
    /// The step whose payload this edit touches.
    pub fn step(&self) -> ReviewStep {
        use FieldEdit::*;
        match self {
            Inbox(..) | CaptureNotes(_) => ReviewStep::ClearDecks,
            AddRow(_) | RemoveRow(..) | TeamPerson(..) | TeamCommitmentText(..) | TeamStatus(..)
            | DeliverableName(..) | DeliverableDueDate(..) | DeliverableState(..)
            | FamilyPerson(..) | FamilyNeed(..) | BudgetAdmin(_) | SideProjectNotes(_) => {
                ReviewStep::Commitments
            }
            CalendarConflicts(_) | KeyMeetings(_) | BigThree(..) => ReviewStep::LookAhead,
            FocusBlockScheduled(..) | TimeAudit(_) => ReviewStep::ProtectTime,
            WhatWorked(_) | WhatDidnt(_) | OneChange(_) => ReviewStep::Reflect,
        }
    }

    /// Applies the edit. Returns false if it addressed a row or slot that
    /// does not exist, or removed the last row of a list.
    pub fn apply(&self, draft: &mut ReviewDraft) -> bool {
        use FieldEdit::*;
        let commitments = &mut draft.commitments;
        match self {
            Inbox(source, processed) => draft.clear_decks.inbox.set(*source, *processed),
            CaptureNotes(v) => draft.clear_decks.capture_notes = v.clone(),

            AddRow(list) => commitments.add_row(*list),
            RemoveRow(list, index) => return commitments.remove_row(*list, *index),
            TeamPerson(i, v) => {
                return set_row(&mut commitments.team_commitments, *i, |r| r.person = v.clone())
            }
            TeamCommitmentText(i, v) => {
                return set_row(&mut commitments.team_commitments, *i, |r| r.commitment = v.clone())
            }
            TeamStatus(i, status) => {
                return set_row(&mut commitments.team_commitments, *i, |r| r.status = *status)
            }
            DeliverableName(i, v) => {
                return set_row(&mut commitments.deliverables, *i, |r| r.name = v.clone())
            }
            DeliverableDueDate(i, due) => {
                return set_row(&mut commitments.deliverables, *i, |r| r.due_date = *due)
            }
            DeliverableState(i, status) => {
                return set_row(&mut commitments.deliverables, *i, |r| r.status = *status)
            }
            FamilyPerson(i, v) => {
                return set_row(&mut commitments.family_commitments, *i, |r| r.person = v.clone())
            }
            FamilyNeed(i, v) => {
                return set_row(&mut commitments.family_commitments, *i, |r| r.need = v.clone())
            }
            BudgetAdmin(v) => commitments.budget_admin = v.clone(),
            SideProjectNotes(v) => commitments.side_project_notes = v.clone(),

            CalendarConflicts(v) => draft.look_ahead.calendar_conflicts = v.clone(),
            KeyMeetings(v) => draft.look_ahead.key_meetings = v.clone(),
            BigThree(slot, v) => {
                return set_row(&mut draft.look_ahead.big_three, *slot, |p| *p = v.clone())
            }

            FocusBlockScheduled(block, scheduled) => draft.protect_time.focus_blocks.set(*block, *scheduled),
            TimeAudit(v) => draft.protect_time.time_audit = v.clone(),

            WhatWorked(v) => draft.reflection.what_worked = v.clone(),
            WhatDidnt(v) => draft.reflection.what_didnt = v.clone(),
            OneChange(v) => draft.reflection.one_change = v.clone(),
        }
        true
    }
}

fn set_row<T>(rows: &mut [T], index: usize, update: impl FnOnce(&mut T)) -> bool {
    match rows.get_mut(index) {
        Some(row) => {
            update(row);
            true
        }
        None => false,
    }
}

/// Events the wizard reducer understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    FieldChanged(FieldEdit),
    AdvanceRequested,
    SaveSucceeded,
    SaveFailed { message: String, retryable: bool },
    BackRequested,
}
