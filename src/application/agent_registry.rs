//! Agent profile registry.
//!
//! Resolves each agent's instructions once at startup in two steps: the
//! external resource first, then the compiled-in fallback. Resolution never
//! fails; which step supplied the text is recorded on the profile and logged.

use crate::domain::agents::{AgentKind, AgentProfile, InstructionOrigin};
use crate::ports::InstructionSource;

/// Read-only set of the three agent profiles.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    po_expert: AgentProfile,
    reviewer: AgentProfile,
    task_overview: AgentProfile,
}

impl AgentRegistry {
    /// Loads every profile from `source`, falling back per agent.
    pub async fn load(source: &dyn InstructionSource) -> Self {
        Self {
            po_expert: resolve(source, AgentKind::PoExpert).await,
            reviewer: resolve(source, AgentKind::Reviewer).await,
            task_overview: resolve(source, AgentKind::TaskOverview).await,
        }
    }

    /// Registry built from compiled-in instructions only.
    pub fn with_fallbacks() -> Self {
        Self {
            po_expert: AgentProfile::fallback(AgentKind::PoExpert),
            reviewer: AgentProfile::fallback(AgentKind::Reviewer),
            task_overview: AgentProfile::fallback(AgentKind::TaskOverview),
        }
    }

    pub fn get(&self, kind: AgentKind) -> &AgentProfile {
        match kind {
            AgentKind::PoExpert => &self.po_expert,
            AgentKind::Reviewer => &self.reviewer,
            AgentKind::TaskOverview => &self.task_overview,
        }
    }

    pub fn profiles(&self) -> [&AgentProfile; 3] {
        [&self.po_expert, &self.reviewer, &self.task_overview]
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_fallbacks()
    }
}

async fn resolve(source: &dyn InstructionSource, kind: AgentKind) -> AgentProfile {
    match source.load_text(kind.resource_name()).await {
        Ok(text) => {
            tracing::info!(
                agent = %kind,
                resource = kind.resource_name(),
                "Agent instructions loaded from resource"
            );
            AgentProfile::new(kind, text, InstructionOrigin::Resource)
        }
        Err(e) => {
            tracing::warn!(
                agent = %kind,
                resource = kind.resource_name(),
                error = %e,
                "Agent instructions unavailable, using built-in fallback"
            );
            AgentProfile::fallback(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::instructions::InMemoryInstructionSource;
    use crate::domain::agents::fallback_instructions;

    #[tokio::test]
    async fn uses_resource_when_present() {
        let source = InMemoryInstructionSource::new()
            .with_resource("ReviewerInstructions.txt", "custom reviewer");

        let registry = AgentRegistry::load(&source).await;
        let reviewer = registry.get(AgentKind::Reviewer);

        assert_eq!(reviewer.system_instructions(), "custom reviewer");
        assert_eq!(reviewer.origin(), InstructionOrigin::Resource);
    }

    #[tokio::test]
    async fn falls_back_per_agent() {
        let source = InMemoryInstructionSource::new()
            .with_resource("ReviewerInstructions.txt", "custom reviewer");

        let registry = AgentRegistry::load(&source).await;
        let po = registry.get(AgentKind::PoExpert);

        assert_eq!(po.origin(), InstructionOrigin::Fallback);
        assert_eq!(po.system_instructions(), fallback_instructions(AgentKind::PoExpert));
    }

    #[tokio::test]
    async fn empty_source_yields_all_fallbacks() {
        let registry = AgentRegistry::load(&InMemoryInstructionSource::new()).await;
        assert!(registry
            .profiles()
            .iter()
            .all(|p| p.origin() == InstructionOrigin::Fallback));
    }

    #[test]
    fn get_returns_matching_kind() {
        let registry = AgentRegistry::with_fallbacks();
        for kind in AgentKind::ALL {
            assert_eq!(registry.get(kind).kind(), kind);
        }
    }
}
