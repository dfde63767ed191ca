//! Agent kinds and their resolved profiles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three agents that take part in a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Interviews the Product Owner and drafts the story. Supplies the reply.
    PoExpert,
    /// Judges whether the drafted story is ready.
    Reviewer,
    /// Breaks an approved story into tasks.
    TaskOverview,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::PoExpert, AgentKind::Reviewer, AgentKind::TaskOverview];

    /// Display name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::PoExpert => "PO-Expert",
            AgentKind::Reviewer => "Reviewer",
            AgentKind::TaskOverview => "TaskOverview",
        }
    }

    /// Name of the instruction resource for this agent.
    pub fn resource_name(&self) -> &'static str {
        match self {
            AgentKind::PoExpert => "POExpertInstructions.txt",
            AgentKind::Reviewer => "ReviewerInstructions.txt",
            AgentKind::TaskOverview => "TaskOverviewInstructions.txt",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an agent's instructions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionOrigin {
    /// Loaded from the external instruction resource.
    Resource,
    /// Compiled-in text, used because the resource was missing or unreadable.
    Fallback,
}

/// Immutable agent configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    kind: AgentKind,
    instructions: String,
    origin: InstructionOrigin,
}

impl AgentProfile {
    pub fn new(kind: AgentKind, instructions: impl Into<String>, origin: InstructionOrigin) -> Self {
        Self {
            kind,
            instructions: instructions.into(),
            origin,
        }
    }

    /// Profile carrying the built-in instructions.
    pub fn fallback(kind: AgentKind) -> Self {
        Self::new(kind, super::fallback_instructions(kind), InstructionOrigin::Fallback)
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn system_instructions(&self) -> &str {
        &self.instructions
    }

    pub fn origin(&self) -> InstructionOrigin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_match_agents() {
        assert_eq!(AgentKind::PoExpert.resource_name(), "POExpertInstructions.txt");
        assert_eq!(AgentKind::Reviewer.resource_name(), "ReviewerInstructions.txt");
        assert_eq!(AgentKind::TaskOverview.resource_name(), "TaskOverviewInstructions.txt");
    }

    #[test]
    fn fallback_profile_is_marked() {
        let profile = AgentProfile::fallback(AgentKind::Reviewer);
        assert_eq!(profile.origin(), InstructionOrigin::Fallback);
        assert_eq!(profile.name(), "Reviewer");
        assert!(!profile.system_instructions().is_empty());
    }
}
