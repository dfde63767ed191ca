//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat-completion backend used by every agent
//! - `SessionStore` - Conversation histories keyed by session id
//! - `InstructionSource` - Named instruction resources for agents
//! - `HealthCheck` - Named probes reported by the health endpoints

mod ai_provider;
mod health_check;
mod instruction_source;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, PromptMessage,
    ProviderInfo, TokenUsage,
};
pub use health_check::{HealthCheck, HealthCheckResult, HealthStatus, LIVE_TAG};
pub use instruction_source::{InstructionSource, InstructionSourceError};
pub use session_store::{SessionStore, SessionStoreError};
