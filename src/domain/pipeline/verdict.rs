//! Reviewer verdict and the fixed probes sent on branch copies.

use serde::{Deserialize, Serialize};

/// Question appended to a branch copy before the Reviewer runs.
pub const REVIEW_PROBE: &str = "A US está clara, eficaz e no formato adequado? true or false?";

/// Question appended to a branch copy before the TaskOverview agent runs.
pub const TASK_OVERVIEW_PROBE: &str = "Quais atividades sugere para a US em questão?";

/// Outcome of the Reviewer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    Approved,
    Rejected,
}

impl ReviewVerdict {
    /// Reads the Reviewer's reply.
    ///
    /// Only a reply that is exactly `true` (ignoring case and surrounding
    /// whitespace) approves the story. Anything else, including text that
    /// merely contains `true`, rejects it.
    pub fn parse(reply: &str) -> Self {
        if reply.trim().eq_ignore_ascii_case("true") {
            ReviewVerdict::Approved
        } else {
            ReviewVerdict::Rejected
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ReviewVerdict::Approved)
    }
}

impl From<ReviewVerdict> for bool {
    fn from(verdict: ReviewVerdict) -> bool {
        verdict.is_approved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_in_any_case_approves() {
        for reply in ["TRUE", "true", "True", "  tRuE \n"] {
            assert!(ReviewVerdict::parse(reply).is_approved(), "{:?}", reply);
        }
    }

    #[test]
    fn anything_else_rejects() {
        for reply in ["maybe", "", "FALSE", "false", "TRUE.", "It is TRUE", "yes"] {
            assert_eq!(ReviewVerdict::parse(reply), ReviewVerdict::Rejected, "{:?}", reply);
        }
    }

    #[test]
    fn converts_to_bool() {
        assert!(bool::from(ReviewVerdict::Approved));
        assert!(!bool::from(ReviewVerdict::Rejected));
    }
}
