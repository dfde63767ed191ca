//! Conversation domain module.
//!
//! Messages, the append-only history a session accumulates, and the
//! session snapshot kept by the store.

mod history;
mod message;
mod session;

pub use history::ConversationHistory;
pub use message::{Message, MessageRole};
pub use session::Session;
