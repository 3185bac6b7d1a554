//! Per-step field payloads and the draft that holds all five.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::ReviewStep;
use crate::domain::foundation::ValidationError;

// ───────────────────────────────────────────────────────────────
// Step 1: Clear the Decks
// ───────────────────────────────────────────────────────────────

/// Inbox sources that must all be processed before step 1 is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboxSource {
    Email,
    Slack,
    Notes,
    Texts,
    Mental,
    Calendar,
}

impl InboxSource {
    pub const ALL: [InboxSource; 6] = [
        InboxSource::Email,
        InboxSource::Slack,
        InboxSource::Notes,
        InboxSource::Texts,
        InboxSource::Mental,
        InboxSource::Calendar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InboxSource::Email => "Email inbox",
            InboxSource::Slack => "Slack/Teams starred messages",
            InboxSource::Notes => "Notes app / random scraps",
            InboxSource::Texts => "Text messages with open loops",
            InboxSource::Mental => "Mental \"oh crap\" thoughts",
            InboxSource::Calendar => "Calendar items needing action",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxSources {
    pub email: bool,
    pub slack: bool,
    pub notes: bool,
    pub texts: bool,
    pub mental: bool,
    pub calendar: bool,
}

impl InboxSources {
    pub fn get(&self, source: InboxSource) -> bool {
        match source {
            InboxSource::Email => self.email,
            InboxSource::Slack => self.slack,
            InboxSource::Notes => self.notes,
            InboxSource::Texts => self.texts,
            InboxSource::Mental => self.mental,
            InboxSource::Calendar => self.calendar,
        }
    }

    pub fn set(&mut self, source: InboxSource, processed: bool) {
        let flag = match source {
            InboxSource::Email => &mut self.email,
            InboxSource::Slack => &mut self.slack,
            InboxSource::Notes => &mut self.notes,
            InboxSource::Texts => &mut self.texts,
            InboxSource::Mental => &mut self.mental,
            InboxSource::Calendar => &mut self.calendar,
        };
        *flag = processed;
    }

    pub fn processed_count(&self) -> usize {
        InboxSource::ALL.iter().filter(|s| self.get(**s)).count()
    }

    pub fn all_processed(&self) -> bool {
        self.processed_count() == InboxSource::ALL.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearDecks {
    pub inbox: InboxSources,
    pub capture_notes: String,
}

// ───────────────────────────────────────────────────────────────
// Step 2: Review Commitments
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentStatus {
    #[default]
    OnTrack,
    AtRisk,
    Blocked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Blocked,
}

/// Something promised to or by a team member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamCommitment {
    pub person: String,
    pub commitment: String,
    pub status: CommitmentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deliverable {
    pub name: String,
    pub due_date: Option<NaiveDate>,
    pub status: DeliverableStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyCommitment {
    pub person: String,
    pub need: String,
}

/// Step 2 payload. Each list keeps at least one row while being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commitments {
    pub team_commitments: Vec<TeamCommitment>,
    pub deliverables: Vec<Deliverable>,
    pub family_commitments: Vec<FamilyCommitment>,
    pub budget_admin: String,
    pub side_project_notes: String,
}

impl Default for Commitments {
    fn default() -> Self {
        Self {
            team_commitments: vec![TeamCommitment::default()],
            deliverables: vec![Deliverable {
                status: DeliverableStatus::InProgress,
                ..Deliverable::default()
            }],
            family_commitments: vec![FamilyCommitment::default()],
            budget_admin: String::new(),
            side_project_notes: String::new(),
        }
    }
}

/// Which repeatable list of step 2 an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentList {
    Team,
    Deliverables,
    Family,
}

impl Commitments {
    /// Appends a blank row. New deliverables start as not started.
    pub fn add_row(&mut self, list: CommitmentList) {
        match list {
            CommitmentList::Team => self.team_commitments.push(TeamCommitment::default()),
            CommitmentList::Deliverables => self.deliverables.push(Deliverable::default()),
            CommitmentList::Family => self.family_commitments.push(FamilyCommitment::default()),
        }
    }

    /// Removes a row. Returns false when the index is out of bounds or the
    /// row is the only one left.
    pub fn remove_row(&mut self, list: CommitmentList, index: usize) -> bool {
        fn remove_keeping_one<T>(rows: &mut Vec<T>, index: usize) -> bool {
            if rows.len() <= 1 || index >= rows.len() {
                return false;
            }
            rows.remove(index);
            true
        }

        match list {
            CommitmentList::Team => remove_keeping_one(&mut self.team_commitments, index),
            CommitmentList::Deliverables => remove_keeping_one(&mut self.deliverables, index),
            CommitmentList::Family => remove_keeping_one(&mut self.family_commitments, index),
        }
    }

    pub fn row_count(&self, list: CommitmentList) -> usize {
        match list {
            CommitmentList::Team => self.team_commitments.len(),
            CommitmentList::Deliverables => self.deliverables.len(),
            CommitmentList::Family => self.family_commitments.len(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Step 3: Look Ahead
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookAhead {
    pub calendar_conflicts: String,
    pub key_meetings: String,
    /// Exactly three priorities for the coming week, in order.
    pub big_three: [String; 3],
}

impl LookAhead {
    pub fn big_three_filled(&self) -> usize {
        self.big_three.iter().filter(|p| !p.trim().is_empty()).count()
    }
}

// ───────────────────────────────────────────────────────────────
// Step 4: Protect Your Time
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusBlock {
    DeepWork,
    SideProject,
    MeetingFree,
    PrepTime,
    Buffer,
}

impl FocusBlock {
    pub const ALL: [FocusBlock; 5] = [
        FocusBlock::DeepWork,
        FocusBlock::SideProject,
        FocusBlock::MeetingFree,
        FocusBlock::PrepTime,
        FocusBlock::Buffer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FocusBlock::DeepWork => "Deep work block (2+ hours)",
            FocusBlock::SideProject => "Side project time",
            FocusBlock::MeetingFree => "Meeting-free morning(s)",
            FocusBlock::PrepTime => "1:1 prep time",
            FocusBlock::Buffer => "Buffer blocks",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusBlocks {
    pub deep_work: bool,
    pub side_project: bool,
    pub meeting_free: bool,
    pub prep_time: bool,
    pub buffer: bool,
}

impl FocusBlocks {
    pub fn get(&self, block: FocusBlock) -> bool {
        match block {
            FocusBlock::DeepWork => self.deep_work,
            FocusBlock::SideProject => self.side_project,
            FocusBlock::MeetingFree => self.meeting_free,
            FocusBlock::PrepTime => self.prep_time,
            FocusBlock::Buffer => self.buffer,
        }
    }

    pub fn set(&mut self, block: FocusBlock, scheduled: bool) {
        let flag = match block {
            FocusBlock::DeepWork => &mut self.deep_work,
            FocusBlock::SideProject => &mut self.side_project,
            FocusBlock::MeetingFree => &mut self.meeting_free,
            FocusBlock::PrepTime => &mut self.prep_time,
            FocusBlock::Buffer => &mut self.buffer,
        };
        *flag = scheduled;
    }

    pub fn scheduled_count(&self) -> usize {
        FocusBlock::ALL.iter().filter(|b| self.get(**b)).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectTime {
    pub focus_blocks: FocusBlocks,
    pub time_audit: String,
}

// ───────────────────────────────────────────────────────────────
// Step 5: Quick Reflection
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reflection {
    pub what_worked: String,
    pub what_didnt: String,
    pub one_change: String,
}

// ───────────────────────────────────────────────────────────────
// Step payload and draft
// ───────────────────────────────────────────────────────────────

/// The fields captured by one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepPayload {
    ClearDecks(ClearDecks),
    Commitments(Commitments),
    LookAhead(LookAhead),
    ProtectTime(ProtectTime),
    Reflect(Reflection),
}

impl StepPayload {
    pub fn step(&self) -> ReviewStep {
        match self {
            StepPayload::ClearDecks(_) => ReviewStep::ClearDecks,
            StepPayload::Commitments(_) => ReviewStep::Commitments,
            StepPayload::LookAhead(_) => ReviewStep::LookAhead,
            StepPayload::ProtectTime(_) => ReviewStep::ProtectTime,
            StepPayload::Reflect(_) => ReviewStep::Reflect,
        }
    }

    /// Parses the JSON body of a step. The step decides the shape, so the
    /// payload itself carries no tag.
    pub fn from_json(step: ReviewStep, value: JsonValue) -> Result<Self, ValidationError> {
        let invalid = |e: serde_json::Error| ValidationError::invalid_format("payload", e.to_string());
        Ok(match step {
            ReviewStep::ClearDecks => StepPayload::ClearDecks(serde_json::from_value(value).map_err(invalid)?),
            ReviewStep::Commitments => StepPayload::Commitments(serde_json::from_value(value).map_err(invalid)?),
            ReviewStep::LookAhead => StepPayload::LookAhead(serde_json::from_value(value).map_err(invalid)?),
            ReviewStep::ProtectTime => StepPayload::ProtectTime(serde_json::from_value(value).map_err(invalid)?),
            ReviewStep::Reflect => StepPayload::Reflect(serde_json::from_value(value).map_err(invalid)?),
        })
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// All five step payloads of one review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewDraft {
    pub clear_decks: ClearDecks,
    pub commitments: Commitments,
    pub look_ahead: LookAhead,
    pub protect_time: ProtectTime,
    pub reflection: Reflection,
}

impl ReviewDraft {
    /// Copy of the payload for one step.
    pub fn payload(&self, step: ReviewStep) -> StepPayload {
        match step {
            ReviewStep::ClearDecks => StepPayload::ClearDecks(self.clear_decks.clone()),
            ReviewStep::Commitments => StepPayload::Commitments(self.commitments.clone()),
            ReviewStep::LookAhead => StepPayload::LookAhead(self.look_ahead.clone()),
            ReviewStep::ProtectTime => StepPayload::ProtectTime(self.protect_time.clone()),
            ReviewStep::Reflect => StepPayload::Reflect(self.reflection.clone()),
        }
    }

    /// Replaces the payload of the step it belongs to.
    pub fn set(&mut self, payload: StepPayload) {
        match payload {
            StepPayload::ClearDecks(p) => self.clear_decks = p,
            StepPayload::Commitments(p) => self.commitments = p,
            StepPayload::LookAhead(p) => self.look_ahead = p,
            StepPayload::ProtectTime(p) => self.protect_time = p,
            StepPayload::Reflect(p) => self.reflection = p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commitments_start_with_one_blank_row_each() {
        let c = Commitments::default();
        assert_eq!(c.team_commitments.len(), 1);
        assert_eq!(c.deliverables.len(), 1);
        assert_eq!(c.family_commitments.len(), 1);
        assert_eq!(c.team_commitments[0].status, CommitmentStatus::OnTrack);
        assert_eq!(c.deliverables[0].status, DeliverableStatus::InProgress);
    }

    #[test]
    fn added_deliverables_start_not_started() {
        let mut c = Commitments::default();
        c.add_row(CommitmentList::Deliverables);
        assert_eq!(c.deliverables[1].status, DeliverableStatus::NotStarted);
    }

    #[test]
    fn removing_the_last_row_is_a_no_op() {
        let mut c = Commitments::default();
        assert!(!c.remove_row(CommitmentList::Team, 0));
        assert_eq!(c.row_count(CommitmentList::Team), 1);

        c.add_row(CommitmentList::Team);
        c.team_commitments[1].person = "Priya".to_string();
        assert!(c.remove_row(CommitmentList::Team, 0));
        assert_eq!(c.team_commitments[0].person, "Priya");
    }

    #[test]
    fn removing_out_of_bounds_is_a_no_op() {
        let mut c = Commitments::default();
        c.add_row(CommitmentList::Family);
        assert!(!c.remove_row(CommitmentList::Family, 5));
        assert_eq!(c.row_count(CommitmentList::Family), 2);
    }

    #[test]
    fn inbox_flags_are_addressed_by_source() {
        let mut inbox = InboxSources::default();
        inbox.set(InboxSource::Slack, true);
        inbox.set(InboxSource::Slack, true);

        assert!(inbox.get(InboxSource::Slack));
        assert_eq!(inbox.processed_count(), 1);
        assert!(!inbox.all_processed());

        for source in InboxSource::ALL {
            inbox.set(source, true);
        }
        assert!(inbox.all_processed());
    }

    #[test]
    fn focus_blocks_count_scheduled() {
        let mut blocks = FocusBlocks::default();
        blocks.set(FocusBlock::DeepWork, true);
        blocks.set(FocusBlock::Buffer, true);
        assert_eq!(blocks.scheduled_count(), 2);
        blocks.set(FocusBlock::Buffer, false);
        assert_eq!(blocks.scheduled_count(), 1);
    }

    #[test]
    fn from_json_uses_step_to_pick_shape() {
        let payload = StepPayload::from_json(
            ReviewStep::LookAhead,
            json!({
                "calendar_conflicts": "Board prep Tuesday",
                "key_meetings": "Exec sync",
                "big_three": ["Ship beta", "Finish reviews", "Plan coverage"]
            }),
        )
        .unwrap();

        match payload {
            StepPayload::LookAhead(ahead) => {
                assert_eq!(ahead.big_three[2], "Plan coverage");
                assert_eq!(ahead.big_three_filled(), 3);
            }
            other => panic!("Expected LookAhead, got {:?}", other),
        }
    }

    #[test]
    fn from_json_fills_missing_fields_with_defaults() {
        let payload = StepPayload::from_json(ReviewStep::Reflect, json!({"what_worked": "x"})).unwrap();
        assert_eq!(
            payload,
            StepPayload::Reflect(Reflection {
                what_worked: "x".to_string(),
                ..Reflection::default()
            })
        );
    }

    #[test]
    fn from_json_rejects_wrong_types() {
        let result = StepPayload::from_json(ReviewStep::LookAhead, json!({"big_three": "nope"}));
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn draft_set_and_payload_round_trip_per_step() {
        let mut draft = ReviewDraft::default();
        let reflection = Reflection {
            what_worked: "Mornings".into(),
            what_didnt: "Late meetings".into(),
            one_change: "Block Fridays".into(),
        };
        draft.set(StepPayload::Reflect(reflection.clone()));

        assert_eq!(draft.payload(ReviewStep::Reflect), StepPayload::Reflect(reflection));
        assert_eq!(draft.payload(ReviewStep::Reflect).step(), ReviewStep::Reflect);
    }
}
