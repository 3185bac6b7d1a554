//! Review step validator.
//!
//! One rule set per step. A field counts as empty after trimming, and list
//! rules apply to every row currently in the list, including blank rows the
//! user added and never filled in.

use serde::{Deserialize, Serialize};

use super::payload::{ClearDecks, Commitments, FocusBlock, InboxSource, LookAhead, ProtectTime, Reflection, StepPayload};
use super::ReviewStep;

const REQUIRED: &str = "Required";

/// A single reason a step cannot advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Path of the offending field, e.g. `team_commitments[1].person`.
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepValidation {
    pub step: ReviewStep,
    pub issues: Vec<FieldIssue>,
}

impl StepValidation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// True iff every required field of the payload's step is filled in.
pub fn is_step_valid(payload: &StepPayload) -> bool {
    validate_step(payload).is_valid()
}

/// Collects every field-level issue of the payload's step.
pub fn validate_step(payload: &StepPayload) -> StepValidation {
    let issues = match payload {
        StepPayload::ClearDecks(p) => clear_decks_issues(p),
        StepPayload::Commitments(p) => commitments_issues(p),
        StepPayload::LookAhead(p) => look_ahead_issues(p),
        StepPayload::ProtectTime(p) => protect_time_issues(p),
        StepPayload::Reflect(p) => reflection_issues(p),
    };
    StepValidation {
        step: payload.step(),
        issues,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn clear_decks_issues(p: &ClearDecks) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if !p.inbox.all_processed() {
        issues.push(FieldIssue::new(
            "inbox",
            format!(
                "Process all inbox sources ({}/{} processed)",
                p.inbox.processed_count(),
                InboxSource::ALL.len()
            ),
        ));
    }
    if is_blank(&p.capture_notes) {
        issues.push(FieldIssue::new(
            "capture_notes",
            "Capture at least one item in the notes field",
        ));
    }
    issues
}

fn commitments_issues(p: &Commitments) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    let lists = [
        ("team_commitments", p.team_commitments.is_empty()),
        ("deliverables", p.deliverables.is_empty()),
        ("family_commitments", p.family_commitments.is_empty()),
    ];
    for (field, empty) in lists {
        if empty {
            issues.push(FieldIssue::new(field, "Add at least one row"));
        }
    }

    for (i, row) in p.team_commitments.iter().enumerate() {
        if is_blank(&row.person) {
            issues.push(FieldIssue::new(format!("team_commitments[{i}].person"), REQUIRED));
        }
        if is_blank(&row.commitment) {
            issues.push(FieldIssue::new(format!("team_commitments[{i}].commitment"), REQUIRED));
        }
    }
    for (i, row) in p.deliverables.iter().enumerate() {
        if is_blank(&row.name) {
            issues.push(FieldIssue::new(format!("deliverables[{i}].name"), REQUIRED));
        }
    }
    for (i, row) in p.family_commitments.iter().enumerate() {
        if is_blank(&row.person) {
            issues.push(FieldIssue::new(format!("family_commitments[{i}].person"), REQUIRED));
        }
        if is_blank(&row.need) {
            issues.push(FieldIssue::new(format!("family_commitments[{i}].need"), REQUIRED));
        }
    }
    if is_blank(&p.budget_admin) {
        issues.push(FieldIssue::new("budget_admin", "Add budget & admin notes"));
    }
    if is_blank(&p.side_project_notes) {
        issues.push(FieldIssue::new("side_project_notes", "Add side project progress notes"));
    }
    issues
}

fn look_ahead_issues(p: &LookAhead) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if is_blank(&p.calendar_conflicts) {
        issues.push(FieldIssue::new(
            "calendar_conflicts",
            "Add calendar conflicts & prep needed",
        ));
    }
    if is_blank(&p.key_meetings) {
        issues.push(FieldIssue::new("key_meetings", "Add key meetings this week"));
    }
    let filled = p.big_three_filled();
    for (i, priority) in p.big_three.iter().enumerate() {
        if is_blank(priority) {
            issues.push(FieldIssue::new(
                format!("big_three[{i}]"),
                format!("Set all 3 Big priorities ({filled}/3 filled)"),
            ));
        }
    }
    issues
}

fn protect_time_issues(p: &ProtectTime) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    let checked = p.focus_blocks.scheduled_count();
    if checked < FocusBlock::ALL.len() {
        issues.push(FieldIssue::new(
            "focus_blocks",
            format!("Schedule all 5 focus blocks ({checked}/5 checked)"),
        ));
    }
    if is_blank(&p.time_audit) {
        issues.push(FieldIssue::new("time_audit", "Complete the time audit reflection"));
    }
    issues
}

fn reflection_issues(p: &Reflection) -> Vec<FieldIssue> {
    [
        ("what_worked", &p.what_worked),
        ("what_didnt", &p.what_didnt),
        ("one_change", &p.one_change),
    ]
    .into_iter()
    .filter(|(_, value)| is_blank(value))
    .map(|(field, _)| FieldIssue::new(field, REQUIRED))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::fixtures::*;
    use crate::domain::review::payload::*;
    use proptest::prelude::*;

    fn fields(validation: &StepValidation) -> Vec<&str> {
        validation.issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn minimal_single_character_payloads_are_valid() {
        for payload in [
            StepPayload::ClearDecks(valid_clear_decks()),
            StepPayload::Commitments(valid_commitments()),
            StepPayload::LookAhead(valid_look_ahead()),
            StepPayload::ProtectTime(valid_protect_time()),
            StepPayload::Reflect(valid_reflection()),
        ] {
            assert!(is_step_valid(&payload), "{:?}", validate_step(&payload));
        }
    }

    #[test]
    fn empty_payloads_are_invalid_for_every_step() {
        for step in ReviewStep::ALL {
            let payload = crate::domain::review::ReviewDraft::default().payload(step);
            assert!(!is_step_valid(&payload), "{} should not validate empty", step);
        }
    }

    #[test]
    fn one_unprocessed_inbox_blocks_step_one() {
        let mut p = valid_clear_decks();
        p.inbox.set(InboxSource::Mental, false);

        let result = validate_step(&StepPayload::ClearDecks(p));
        assert_eq!(fields(&result), vec!["inbox"]);
        assert_eq!(result.issues[0].message, "Process all inbox sources (5/6 processed)");
    }

    #[test]
    fn blank_added_row_blocks_whole_step() {
        let mut p = valid_commitments();
        p.add_row(CommitmentList::Team);

        let result = validate_step(&StepPayload::Commitments(p));
        assert_eq!(
            fields(&result),
            vec!["team_commitments[1].person", "team_commitments[1].commitment"]
        );
        assert!(result.issues.iter().all(|i| i.message == "Required"));
    }

    #[test]
    fn step_two_needs_a_row_in_every_list() {
        let body = serde_json::json!({
            "team_commitments": [],
            "deliverables": [],
            "family_commitments": [],
            "budget_admin": "x",
            "side_project_notes": "x"
        });
        let payload = StepPayload::from_json(ReviewStep::Commitments, body).unwrap();

        let result = validate_step(&payload);
        assert!(!result.is_valid());
        assert_eq!(
            fields(&result),
            vec!["team_commitments", "deliverables", "family_commitments"]
        );
        assert!(result.issues.iter().all(|i| i.message == "Add at least one row"));
    }

    #[test]
    fn step_two_reports_notes_fields() {
        let mut p = valid_commitments();
        p.budget_admin = String::from("  ");
        p.side_project_notes = String::new();
        p.deliverables[0].name = String::from("\t");

        let result = validate_step(&StepPayload::Commitments(p));
        assert_eq!(
            fields(&result),
            vec!["deliverables[0].name", "budget_admin", "side_project_notes"]
        );
    }

    #[test]
    fn big_three_reports_fill_count() {
        let mut p = valid_look_ahead();
        p.big_three[1] = String::from("   ");

        let result = validate_step(&StepPayload::LookAhead(p));
        assert_eq!(fields(&result), vec!["big_three[1]"]);
        assert_eq!(result.issues[0].message, "Set all 3 Big priorities (2/3 filled)");
    }

    #[test]
    fn focus_blocks_report_checked_count() {
        let mut p = valid_protect_time();
        p.focus_blocks.set(FocusBlock::PrepTime, false);
        p.focus_blocks.set(FocusBlock::Buffer, false);

        let result = validate_step(&StepPayload::ProtectTime(p));
        assert_eq!(result.issues[0].message, "Schedule all 5 focus blocks (3/5 checked)");
    }

    #[test]
    fn reflection_lists_each_blank_field() {
        let p = Reflection {
            what_worked: String::from("x"),
            ..Reflection::default()
        };
        let result = validate_step(&StepPayload::Reflect(p));
        assert_eq!(fields(&result), vec!["what_didnt", "one_change"]);
        assert_eq!(result.step, ReviewStep::Reflect);
    }

    proptest! {
        #[test]
        fn whitespace_only_text_never_validates(ws in "[ \t\n\r]{0,8}", which in 0usize..3) {
            let mut p = valid_reflection();
            match which {
                0 => p.what_worked = ws,
                1 => p.what_didnt = ws,
                _ => p.one_change = ws,
            }
            prop_assert!(!is_step_valid(&StepPayload::Reflect(p)));
        }

        #[test]
        fn any_non_blank_text_satisfies_required_fields(text in "[ ]{0,3}[a-zA-Z0-9]{1,12}[ ]{0,3}") {
            let p = LookAhead {
                calendar_conflicts: text.clone(),
                key_meetings: text.clone(),
                big_three: [text.clone(), text.clone(), text],
            };
            prop_assert!(is_step_valid(&StepPayload::LookAhead(p)));
        }

        #[test]
        fn any_blank_big_three_slot_invalidates(slot in 0usize..3, ws in "[ \t]{0,4}") {
            let mut p = valid_look_ahead();
            p.big_three[slot] = ws;
            let result = validate_step(&StepPayload::LookAhead(p));
            prop_assert!(!result.is_valid());
            let expected = format!("big_three[{}]", slot);
            prop_assert!(result.issues.iter().any(|i| i.field == expected));
        }
    }
}
