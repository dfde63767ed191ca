//! Session storage adapters.

mod in_memory_session_store;
mod session_sweeper;

pub use in_memory_session_store::{InMemorySessionStore, SessionLimits};
pub use session_sweeper::SessionSweeper;
