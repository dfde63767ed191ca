//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI-compatible completion endpoint, plus a mock for tests
//! - `storage` - In-memory session store and its idle sweeper
//! - `instructions` - Agent instruction files
//! - `health` - Health probes
//! - `http` - REST endpoints (axum)

pub mod ai;
pub mod health;
pub mod http;
pub mod instructions;
pub mod storage;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use instructions::{FileInstructionSource, InMemoryInstructionSource};
pub use storage::{InMemorySessionStore, SessionLimits, SessionSweeper};
