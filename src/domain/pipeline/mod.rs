//! Turn pipeline vocabulary: state machine, reviewer verdict, probes.

mod state;
mod verdict;

pub use state::PipelineState;
pub use verdict::{ReviewVerdict, REVIEW_PROBE, TASK_OVERVIEW_PROBE};
