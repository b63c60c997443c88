//! Run lifecycle.
//!
//! `Pending -> Running -> Completed | Failed`. Terminal states are final: a
//! run is never resumed or retried in place.

use serde::{Deserialize, Serialize};

/// Execution run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Created, nothing issued yet.
    Pending,
    /// Gateway calls in progress.
    Running,
    /// Every call succeeded.
    Completed,
    /// A call failed; no output is kept.
    Failed,
}

impl RunState {
    /// Checks if the run can move to the given state.
    #[must_use]
    pub fn can_transition_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Running) | (Self::Running, Self::Completed | Self::Failed)
        )
    }

    /// `true` for `Completed` and `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(RunState::Pending.can_transition_to(RunState::Running));
        assert!(RunState::Running.can_transition_to(RunState::Completed));
        assert!(RunState::Running.can_transition_to(RunState::Failed));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!RunState::Pending.can_transition_to(RunState::Completed));
        assert!(!RunState::Pending.can_transition_to(RunState::Failed));
        assert!(!RunState::Running.can_transition_to(RunState::Pending));
        assert!(!RunState::Running.can_transition_to(RunState::Running));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [RunState::Completed, RunState::Failed] {
            assert!(terminal.is_terminal());
            for to in [RunState::Pending, RunState::Running, RunState::Completed, RunState::Failed] {
                assert!(!terminal.can_transition_to(to), "{terminal:?} -> {to:?}");
            }
        }
        assert!(!RunState::Pending.is_terminal());
        assert!(!RunState::Running.is_terminal());
    }
}
