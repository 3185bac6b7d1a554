//! Checked transitions for lifecycle enums.

use super::ValidationError;

/// A status enum whose legal moves are a fixed table.
pub trait StateMachine: Copy + PartialEq + std::fmt::Debug + 'static {
    /// States reachable in one move from `self`.
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: Self) -> bool {
        self.successors().contains(&target)
    }

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            "status",
            format!("cannot move from {self:?} to {target:?}"),
        ))
    }

    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Open,
        Closed,
        Locked,
        Bricked,
    }

    impl StateMachine for Door {
        fn successors(&self) -> &'static [Self] {
            match self {
                Door::Open => &[Door::Closed],
                Door::Closed => &[Door::Open, Door::Locked, Door::Bricked],
                Door::Locked => &[Door::Closed],
                Door::Bricked => &[],
            }
        }
    }

    #[test]
    fn listed_moves_succeed() {
        assert_eq!(Door::Closed.transition_to(Door::Locked), Ok(Door::Locked));
    }

    #[test]
    fn unlisted_move_names_both_states() {
        let text = Door::Open.transition_to(Door::Locked).unwrap_err().to_string();
        assert!(text.contains("Open") && text.contains("Locked"));
    }

    #[test]
    fn terminal_means_no_exits() {
        assert!(Door::Bricked.is_terminal());
        assert!(!Door::Locked.is_terminal());
    }
}
