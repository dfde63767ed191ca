//! Agent profiles.
//!
//! Each turn involves three agents: PO-Expert, Reviewer and TaskOverview.
//! A profile pairs an agent with the system instructions it runs under.

mod instructions;
mod profile;

pub use instructions::fallback_instructions;
pub use profile::{AgentKind, AgentProfile, InstructionOrigin};
