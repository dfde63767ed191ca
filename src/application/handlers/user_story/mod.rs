//! User story chat handlers.

mod end_session;
mod get_session;
mod process_message;

pub use end_session::{EndSessionCommand, EndSessionError, EndSessionHandler};
pub use get_session::{GetSessionError, GetSessionHandler, GetSessionQuery, SessionView};
pub use process_message::{
    ProcessMessageCommand, ProcessMessageError, ProcessMessageHandler, ProcessMessageResult,
    APOLOGY_MESSAGE, EMPTY_REPLY_MESSAGE,
};
