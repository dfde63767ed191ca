//! Application layer - Pipeline, Handlers, and Health.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod agent_registry;
pub mod handlers;
pub mod health;
mod pipeline;
mod session_locks;

pub use agent_registry::AgentRegistry;
pub use handlers::{
    EndSessionCommand, EndSessionError, EndSessionHandler, GetSessionError, GetSessionHandler,
    GetSessionQuery, ProcessMessageCommand, ProcessMessageError, ProcessMessageHandler,
    ProcessMessageResult, SessionView, APOLOGY_MESSAGE, EMPTY_REPLY_MESSAGE,
};
pub use health::{CheckReport, HealthReport, HealthService};
pub use pipeline::{OrchestrationPipeline, PipelineError, TurnOutcome, DEFAULT_STEP_TIMEOUT};
pub use session_locks::{SessionGuard, SessionLocks};
