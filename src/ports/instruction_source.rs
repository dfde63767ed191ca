//! Instruction Source Port - Loads agent instruction text by resource name.

use async_trait::async_trait;

/// Errors that can occur while loading an instruction resource
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstructionSourceError {
    #[error("Instruction resource not found: {0}")]
    NotFound(String),

    #[error("Instruction resource '{name}' could not be read: {reason}")]
    Unreadable { name: String, reason: String },
}

/// Port for reading named text resources such as `ReviewerInstructions.txt`
#[async_trait]
pub trait InstructionSource: Send + Sync {
    /// Loads the full text of a resource.
    ///
    /// # Errors
    /// `NotFound` when the resource does not exist, `Unreadable` when it
    /// exists but cannot be read or is empty.
    async fn load_text(&self, name: &str) -> Result<String, InstructionSourceError>;
}
