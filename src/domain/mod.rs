//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (session id, timestamp, errors, state machine)
//! - `conversation` - Messages and append-only conversation history
//! - `agents` - Agent kinds, profiles and built-in instructions
//! - `pipeline` - Per-turn state machine, reviewer verdict and probes
//! - `user_story` - User story artifacts and heuristic extraction

pub mod agents;
pub mod conversation;
pub mod foundation;
pub mod pipeline;
pub mod user_story;
