//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod user_story;

pub use user_story::{
    // Commands and queries
    EndSessionCommand,
    GetSessionQuery,
    ProcessMessageCommand,
    // Handlers
    EndSessionHandler,
    GetSessionHandler,
    ProcessMessageHandler,
    // Results and errors
    EndSessionError,
    GetSessionError,
    ProcessMessageError,
    ProcessMessageResult,
    SessionView,
    APOLOGY_MESSAGE,
    EMPTY_REPLY_MESSAGE,
};
