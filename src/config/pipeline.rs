//! Pipeline behaviour configuration

use serde::Deserialize;

use crate::domain::user_story::ReviewedSource;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Where the `reviewed` flag comes from (`history` or `verdict`)
    #[serde(default)]
    pub reviewed_source: ReviewedSource,
}
