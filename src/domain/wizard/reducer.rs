//! Pure wizard reducer: `(state, event) -> state`.
//!
//! Persistence is not performed here. `AdvanceRequested` on a valid step
//! only marks the step as saving; whoever drives the reducer persists
//! `draft.payload(step)` and feeds back `SaveSucceeded` or `SaveFailed`.

use super::event::WizardEvent;
use super::state::{SaveError, WizardPosition, WizardState};

pub fn reduce(mut state: WizardState, event: &WizardEvent) -> WizardState {
    match event {
        WizardEvent::FieldChanged(edit) => {
            // The payload being saved is frozen until the save settles.
            if state.saving == Some(edit.step()) {
                return state;
            }
            if state.current_step() == Some(edit.step()) && edit.apply(&mut state.draft) {
                state.set_show_errors(edit.step(), false);
            }
        }

        WizardEvent::AdvanceRequested => {
            let Some(step) = state.current_step() else {
                return state;
            };
            if state.is_saving() {
                return state;
            }
            if state.issues().is_empty() {
                state.saving = Some(step);
                state.save_error = None;
            } else {
                state.set_show_errors(step, true);
            }
        }

        WizardEvent::SaveSucceeded => {
            let Some(step) = state.saving.take() else {
                return state;
            };
            state.set_show_errors(step, false);
            state.position = match step.next() {
                Some(next) => {
                    state.furthest = state.furthest.max(next);
                    WizardPosition::Step(next)
                }
                None => WizardPosition::Completed,
            };
        }

        WizardEvent::SaveFailed { message, retryable } => {
            if state.saving.take().is_some() {
                state.save_error = Some(SaveError {
                    message: message.clone(),
                    retryable: *retryable,
                });
            }
        }

        WizardEvent::BackRequested => {
            if state.is_saving() {
                return state;
            }
            if let Some(previous) = state.current_step().and_then(|s| s.previous()) {
                state.position = WizardPosition::Step(previous);
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ReviewId;
    use crate::domain::review::{InboxSource, ReviewStep};
    use crate::domain::wizard::FieldEdit;

    fn run(state: WizardState, events: &[WizardEvent]) -> WizardState {
        events.iter().fold(state, reduce)
    }

    fn fresh() -> WizardState {
        WizardState::new(ReviewId::new())
    }

    fn complete_step_one() -> Vec<WizardEvent> {
        let mut events: Vec<WizardEvent> = InboxSource::ALL
            .into_iter()
            .map(|s| WizardEvent::FieldChanged(FieldEdit::Inbox(s, true)))
            .collect();
        events.push(WizardEvent::FieldChanged(FieldEdit::CaptureNotes("x".into())));
        events
    }

    fn on_step(state: &WizardState) -> Option<u8> {
        state.current_step().map(|s| s.number())
    }

    #[test]
    fn starts_on_step_one_with_nothing_shown() {
        let state = fresh();
        assert_eq!(on_step(&state), Some(1));
        assert!(state.visible_issues().is_empty());
        assert!(!state.issues().is_empty());
        assert!(!state.can_advance());
    }

    #[test]
    fn advance_on_invalid_step_stays_and_shows_errors() {
        let state = run(fresh(), &[WizardEvent::AdvanceRequested]);

        assert_eq!(on_step(&state), Some(1));
        assert!(state.saving.is_none());
        assert!(state.shows_errors(ReviewStep::ClearDecks));
        assert_eq!(state.visible_issues().len(), 2);
    }

    #[test]
    fn editing_clears_shown_errors_but_validity_is_live() {
        let state = run(
            fresh(),
            &[
                WizardEvent::AdvanceRequested,
                WizardEvent::FieldChanged(FieldEdit::CaptureNotes("x".into())),
            ],
        );

        assert!(!state.shows_errors(ReviewStep::ClearDecks));
        assert!(state.visible_issues().is_empty());
        assert_eq!(state.issues().len(), 1);
    }

    #[test]
    fn valid_advance_marks_saving_without_moving() {
        let mut events = complete_step_one();
        events.push(WizardEvent::AdvanceRequested);
        let state = run(fresh(), &events);

        assert_eq!(state.saving, Some(ReviewStep::ClearDecks));
        assert_eq!(on_step(&state), Some(1));
        assert!(!state.can_advance());
    }

    #[test]
    fn save_success_moves_forward_and_raises_furthest() {
        let mut events = complete_step_one();
        events.extend([WizardEvent::AdvanceRequested, WizardEvent::SaveSucceeded]);
        let state = run(fresh(), &events);

        assert_eq!(on_step(&state), Some(2));
        assert_eq!(state.furthest, ReviewStep::Commitments);
        assert!(state.saving.is_none());
    }

    #[test]
    fn save_failure_stays_put_with_retryable_error() {
        let mut events = complete_step_one();
        events.extend([
            WizardEvent::AdvanceRequested,
            WizardEvent::SaveFailed {
                message: "storage unavailable".into(),
                retryable: true,
            },
        ]);
        let state = run(fresh(), &events);

        assert_eq!(on_step(&state), Some(1));
        assert_eq!(state.furthest, ReviewStep::ClearDecks);
        assert!(state.save_error.as_ref().unwrap().retryable);
        assert_eq!(state.draft.clear_decks.capture_notes, "x");

        // Retrying clears the banner.
        let state = reduce(state, &WizardEvent::AdvanceRequested);
        assert!(state.save_error.is_none());
        assert_eq!(state.saving, Some(ReviewStep::ClearDecks));
    }

    #[test]
    fn edits_during_a_pending_save_are_dropped() {
        let mut events = complete_step_one();
        events.extend([
            WizardEvent::AdvanceRequested,
            WizardEvent::FieldChanged(FieldEdit::CaptureNotes("typed mid-save".into())),
            WizardEvent::SaveSucceeded,
        ]);
        let state = run(fresh(), &events);

        assert_eq!(on_step(&state), Some(2));
        assert_eq!(state.draft.clear_decks.capture_notes, "x");
    }

    #[test]
    fn duplicate_advance_while_saving_is_ignored() {
        let mut events = complete_step_one();
        events.extend([
            WizardEvent::AdvanceRequested,
            WizardEvent::AdvanceRequested,
            WizardEvent::SaveSucceeded,
            WizardEvent::SaveSucceeded,
        ]);
        let state = run(fresh(), &events);
        assert_eq!(on_step(&state), Some(2));
    }

    #[test]
    fn save_outcomes_without_pending_save_are_ignored() {
        let state = fresh();
        let after = run(
            state.clone(),
            &[
                WizardEvent::SaveSucceeded,
                WizardEvent::SaveFailed {
                    message: "x".into(),
                    retryable: true,
                },
            ],
        );
        assert_eq!(after, state);
    }

    #[test]
    fn back_keeps_data_and_furthest() {
        let mut events = complete_step_one();
        events.extend([
            WizardEvent::AdvanceRequested,
            WizardEvent::SaveSucceeded,
            WizardEvent::FieldChanged(FieldEdit::BudgetAdmin("Receipts".into())),
            WizardEvent::BackRequested,
        ]);
        let state = run(fresh(), &events);

        assert_eq!(on_step(&state), Some(1));
        assert_eq!(state.furthest, ReviewStep::Commitments);
        assert_eq!(state.draft.commitments.budget_admin, "Receipts");
        assert_eq!(state.draft.clear_decks.capture_notes, "x");
    }

    #[test]
    fn back_does_not_revalidate_step_being_left() {
        let mut events = complete_step_one();
        events.extend([
            WizardEvent::AdvanceRequested,
            WizardEvent::SaveSucceeded,
            WizardEvent::AdvanceRequested,
            WizardEvent::BackRequested,
        ]);
        let state = run(fresh(), &events);
        assert_eq!(on_step(&state), Some(1));
    }

    #[test]
    fn back_on_first_step_and_while_saving_is_ignored() {
        let state = run(fresh(), &[WizardEvent::BackRequested]);
        assert_eq!(on_step(&state), Some(1));

        let mut events = complete_step_one();
        events.extend([WizardEvent::AdvanceRequested, WizardEvent::BackRequested]);
        let state = run(fresh(), &events);
        assert_eq!(state.saving, Some(ReviewStep::ClearDecks));
    }

    #[test]
    fn edits_for_other_steps_are_ignored() {
        let state = run(
            fresh(),
            &[WizardEvent::FieldChanged(FieldEdit::OneChange("later".into()))],
        );
        assert_eq!(state.draft.reflection.one_change, "");
    }

    #[test]
    fn last_step_success_completes() {
        let mut state = fresh();
        state.position = WizardPosition::Step(ReviewStep::Reflect);
        state.draft = crate::domain::review::fixtures::valid_draft();

        let state = run(state, &[WizardEvent::AdvanceRequested, WizardEvent::SaveSucceeded]);
        assert!(state.is_completed());
        assert!(state.current_step().is_none());
        assert!(state.issues().is_empty());
    }
}
