//! In-memory instruction source for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::{InstructionSource, InstructionSourceError};

/// Instruction resources held in a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInstructionSource {
    resources: HashMap<String, String>,
}

impl InMemoryInstructionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.resources.insert(name.into(), text.into());
        self
    }
}

#[async_trait]
impl InstructionSource for InMemoryInstructionSource {
    async fn load_text(&self, name: &str) -> Result<String, InstructionSourceError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| InstructionSourceError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_registered_resource() {
        let source = InMemoryInstructionSource::new().with_resource("a.txt", "hello");
        assert_eq!(source.load_text("a.txt").await.unwrap(), "hello");
        assert!(source.load_text("b.txt").await.is_err());
    }
}
