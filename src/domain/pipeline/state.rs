//! Per-turn pipeline state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a single turn currently is.
///
/// ```text
/// AwaitingUser -> PoExpertRun -> ReviewRun -> Complete
///                      |             |
///                      v             v
///                   Aborted    TaskOverviewRun -> Complete
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    #[default]
    AwaitingUser,
    PoExpertRun,
    ReviewRun,
    TaskOverviewRun,
    Complete,
    /// The PO-Expert call failed; nothing is persisted.
    Aborted,
}

impl StateMachine for PipelineState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PipelineState::*;
        matches!(
            (self, target),
            (AwaitingUser, PoExpertRun)
                | (PoExpertRun, ReviewRun)
                | (PoExpertRun, Aborted)
                | (ReviewRun, Complete)
                | (ReviewRun, TaskOverviewRun)
                | (TaskOverviewRun, Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PipelineState::*;
        match self {
            AwaitingUser => vec![PoExpertRun],
            PoExpertRun => vec![ReviewRun, Aborted],
            ReviewRun => vec![Complete, TaskOverviewRun],
            TaskOverviewRun => vec![Complete],
            Complete | Aborted => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PipelineState::*;

    #[test]
    fn happy_path_with_task_overview() {
        let s = AwaitingUser
            .transition_to(PoExpertRun)
            .and_then(|s| s.transition_to(ReviewRun))
            .and_then(|s| s.transition_to(TaskOverviewRun))
            .and_then(|s| s.transition_to(Complete))
            .unwrap();
        assert!(s.is_terminal());
    }

    #[test]
    fn review_may_complete_directly() {
        assert!(ReviewRun.can_transition_to(&Complete));
    }

    #[test]
    fn cannot_skip_po_expert() {
        assert!(AwaitingUser.transition_to(ReviewRun).is_err());
        assert!(AwaitingUser.transition_to(Complete).is_err());
    }

    #[test]
    fn only_po_expert_can_abort() {
        assert!(PoExpertRun.can_transition_to(&Aborted));
        assert!(!ReviewRun.can_transition_to(&Aborted));
        assert!(!TaskOverviewRun.can_transition_to(&Aborted));
        assert!(Aborted.is_terminal());
    }

    #[test]
    fn valid_transitions_agree_with_can_transition() {
        let all = [AwaitingUser, PoExpertRun, ReviewRun, TaskOverviewRun, Complete, Aborted];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }
}
