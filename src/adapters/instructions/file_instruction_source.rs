//! File-based instruction source.
//!
//! Resolves resource names against a single directory, e.g.
//! `instructions/ReviewerInstructions.txt`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ports::{InstructionSource, InstructionSourceError};

/// Reads instruction resources from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileInstructionSource {
    dir: PathBuf,
}

impl FileInstructionSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Only bare file names are accepted; anything that could escape the
    /// directory is treated as missing.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let is_bare = !name.is_empty()
            && Path::new(name).file_name().and_then(|f| f.to_str()) == Some(name)
            && name != ".."
            && name != ".";
        is_bare.then(|| self.dir.join(name))
    }
}

#[async_trait]
impl InstructionSource for FileInstructionSource {
    async fn load_text(&self, name: &str) -> Result<String, InstructionSourceError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| InstructionSourceError::NotFound(name.to_string()))?;

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => InstructionSourceError::NotFound(name.to_string()),
            _ => InstructionSourceError::Unreadable {
                name: name.to_string(),
                reason: e.to_string(),
            },
        })?;

        if text.trim().is_empty() {
            return Err(InstructionSourceError::Unreadable {
                name: name.to_string(),
                reason: "resource is empty".to_string(),
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ReviewerInstructions.txt"), "Responda TRUE ou FALSE").unwrap();

        let source = FileInstructionSource::new(dir.path());
        let text = source.load_text("ReviewerInstructions.txt").await.unwrap();

        assert_eq!(text, "Responda TRUE ou FALSE");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = FileInstructionSource::new(dir.path());

        let err = source.load_text("Nope.txt").await.unwrap_err();
        assert_eq!(err, InstructionSourceError::NotFound("Nope.txt".to_string()));
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let source = FileInstructionSource::new("/definitely/not/here");
        let err = source.load_text("POExpertInstructions.txt").await.unwrap_err();
        assert!(matches!(err, InstructionSourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Empty.txt"), "  \n").unwrap();

        let source = FileInstructionSource::new(dir.path());
        let err = source.load_text("Empty.txt").await.unwrap_err();
        assert!(matches!(err, InstructionSourceError::Unreadable { .. }));
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Sub.txt")).unwrap();

        let source = FileInstructionSource::new(dir.path());
        let err = source.load_text("Sub.txt").await.unwrap_err();
        assert!(matches!(err, InstructionSourceError::Unreadable { .. }));
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() {
        let dir = TempDir::new().unwrap();
        let source = FileInstructionSource::new(dir.path().join("inner"));

        for name in ["../secret.txt", "a/b.txt", "..", ""] {
            let err = source.load_text(name).await.unwrap_err();
            assert!(matches!(err, InstructionSourceError::NotFound(_)), "{:?}", name);
        }
    }
}
