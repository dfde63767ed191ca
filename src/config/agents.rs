//! Agent instruction configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where agent instruction files are read from
#[derive(Debug, Clone, Deserialize)]
pub struct AgentsConfig {
    /// Directory holding `POExpertInstructions.txt`, `ReviewerInstructions.txt`
    /// and `TaskOverviewInstructions.txt`. Missing files fall back to the
    /// built-in texts.
    #[serde(default = "default_instructions_dir")]
    pub instructions_dir: PathBuf,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            instructions_dir: default_instructions_dir(),
        }
    }
}

fn default_instructions_dir() -> PathBuf {
    PathBuf::from("instructions")
}
