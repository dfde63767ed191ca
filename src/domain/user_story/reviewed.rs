//! Choice of where the `reviewed` flag comes from.

use serde::{Deserialize, Serialize};

/// Source of the `reviewed` flag reported with a user story.
///
/// The Reviewer's verdict is produced on a branch copy and never persisted,
/// so scanning history for `TRUE` rarely fires. `Verdict` reports the
/// current turn's verdict instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewedSource {
    /// Any persisted message contains the literal `TRUE`.
    #[default]
    History,
    /// The Reviewer approved the story in the current turn.
    Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_lowercase() {
        let v: ReviewedSource = serde_json::from_str("\"verdict\"").unwrap();
        assert_eq!(v, ReviewedSource::Verdict);
        assert_eq!(ReviewedSource::default(), ReviewedSource::History);
    }
}
