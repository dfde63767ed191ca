//! OrchestrationPipeline - runs the three agents for one user message.
//!
//! ```text
//! AwaitingUser   append the user message
//! PoExpertRun    PO-Expert on the full history, reply appended (fatal on failure)
//! ReviewRun      Reviewer on a branch copy + review probe (failure = rejected)
//! TaskOverviewRun  only when approved: TaskOverview on a branch copy + task
//!                probe, reply appended to the main history (failure = no tasks)
//! Complete       history persisted
//! ```
//!
//! The three completion calls are strictly sequential. Each one races the
//! turn's cancellation token and runs under its own step deadline, so a slow
//! Reviewer or TaskOverview is downgraded like any other failure at those
//! steps. Nothing is persisted unless the turn reaches `Complete`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::domain::agents::AgentKind;
use crate::domain::conversation::{ConversationHistory, MessageRole};
use crate::domain::foundation::{SessionId, StateMachine, ValidationError};
use crate::domain::pipeline::{PipelineState, ReviewVerdict, REVIEW_PROBE, TASK_OVERVIEW_PROBE};
use crate::ports::{AIError, AIProvider, CompletionRequest, SessionStore, SessionStoreError};

use super::AgentRegistry;

/// Everything a completed turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The session history as persisted at the end of the turn.
    pub history: ConversationHistory,
    /// PO-Expert reply, the primary answer to the user.
    pub reply: String,
    pub verdict: ReviewVerdict,
    /// TaskOverview reply, when the story was approved and the call succeeded.
    pub task_overview: Option<String>,
    pub final_state: PipelineState,
}

/// Failures that abort a turn without touching stored history.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{agent} completion failed: {source}")]
    Completion {
        agent: AgentKind,
        #[source]
        source: AIError,
    },

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),

    #[error("Pipeline state error: {0}")]
    State(#[from] ValidationError),
}

impl PipelineError {
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            PipelineError::Completion {
                source: AIError::Cancelled,
                ..
            }
        )
    }
}

/// Deadline for a single agent call when none is configured.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(180);

/// Drives one turn through the agent sequence.
pub struct OrchestrationPipeline {
    provider: Arc<dyn AIProvider>,
    store: Arc<dyn SessionStore>,
    agents: Arc<AgentRegistry>,
    step_timeout: Duration,
}

impl OrchestrationPipeline {
    pub fn new(
        provider: Arc<dyn AIProvider>,
        store: Arc<dyn SessionStore>,
        agents: Arc<AgentRegistry>,
    ) -> Self {
        Self {
            provider,
            store,
            agents,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    /// Sets the deadline applied to each agent call, retries included.
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Runs a full turn for `user_message` on `session_id`.
    ///
    /// # Errors
    /// `Completion` when the PO-Expert call fails, misses its deadline or is
    /// cancelled, `Store`
    /// when the session cannot be read or written. In both cases the stored
    /// history is unchanged.
    pub async fn run_turn(
        &self,
        session_id: &SessionId,
        user_message: &str,
        cancel: &CancellationToken,
    ) -> Result<TurnOutcome, PipelineError> {
        let mut state = PipelineState::AwaitingUser;
        let mut history = self.store.get_or_create(session_id).await?;
        history.push_user(user_message);

        state = state.transition_to(PipelineState::PoExpertRun)?;
        let reply = match self.complete(AgentKind::PoExpert, &history, cancel).await {
            Ok(reply) => reply,
            Err(source) => {
                state = state.transition_to(PipelineState::Aborted)?;
                tracing::error!(
                    session_id = %session_id,
                    error = %source,
                    error_kind = source.kind(),
                    state = ?state,
                    "PO-Expert completion failed, turn aborted"
                );
                return Err(PipelineError::Completion {
                    agent: AgentKind::PoExpert,
                    source,
                });
            }
        };
        history.push_assistant(reply.clone());

        state = state.transition_to(PipelineState::ReviewRun)?;
        let verdict = self.review(session_id, &history, cancel).await;

        let mut task_overview = None;
        if verdict.is_approved() {
            state = state.transition_to(PipelineState::TaskOverviewRun)?;
            task_overview = self.task_overview(session_id, &history, cancel).await;
            if let Some(ref tasks) = task_overview {
                history.push_assistant(tasks.clone());
            }
        }

        state = state.transition_to(PipelineState::Complete)?;
        self.store.save(session_id, history.clone()).await?;

        tracing::debug!(
            session_id = %session_id,
            messages = history.len(),
            user_turns = history.count_role(MessageRole::User),
            approved = verdict.is_approved(),
            tasks = task_overview.is_some(),
            "Turn complete"
        );

        Ok(TurnOutcome {
            history,
            reply,
            verdict,
            task_overview,
            final_state: state,
        })
    }

    /// Reviewer step. Any failure counts as a rejection.
    async fn review(
        &self,
        session_id: &SessionId,
        history: &ConversationHistory,
        cancel: &CancellationToken,
    ) -> ReviewVerdict {
        let mut branch = history.branch();
        branch.push_user(REVIEW_PROBE);

        match self.complete(AgentKind::Reviewer, &branch, cancel).await {
            Ok(answer) => {
                let verdict = ReviewVerdict::parse(&answer);
                tracing::info!(session_id = %session_id, verdict = ?verdict, "Reviewer verdict");
                verdict
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    error_kind = e.kind(),
                    "Reviewer failed, treating story as not approved"
                );
                ReviewVerdict::Rejected
            }
        }
    }

    /// TaskOverview step. Any failure means no task list this turn.
    async fn task_overview(
        &self,
        session_id: &SessionId,
        history: &ConversationHistory,
        cancel: &CancellationToken,
    ) -> Option<String> {
        let mut branch = history.branch();
        branch.push_user(TASK_OVERVIEW_PROBE);

        match self.complete(AgentKind::TaskOverview, &branch, cancel).await {
            Ok(tasks) => Some(tasks),
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    error_kind = e.kind(),
                    "TaskOverview failed, continuing without tasks"
                );
                None
            }
        }
    }

    async fn complete(
        &self,
        agent: AgentKind,
        history: &ConversationHistory,
        cancel: &CancellationToken,
    ) -> Result<String, AIError> {
        let request = CompletionRequest::for_agent(self.agents.get(agent), history);
        let call = tokio::time::timeout(self.step_timeout, self.provider.complete(request));

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(AIError::Cancelled),
            result = call => match result {
                Ok(completion) => completion.map(|r| r.content),
                Err(_) => Err(AIError::Timeout {
                    timeout_secs: u32::try_from(self.step_timeout.as_secs()).unwrap_or(u32::MAX),
                }),
            },
        }
    }
}
