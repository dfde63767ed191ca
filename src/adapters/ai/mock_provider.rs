//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses, shared or per agent
//! - Simulated delays for timeout and cancellation testing
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_agent_response(AgentKind::PoExpert, "Como PO, eu quero X, para Y")
//!     .with_agent_response(AgentKind::Reviewer, "TRUE");
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::agents::AgentKind;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Reply used once every queue is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Mock response";

/// Mock AI provider for testing.
///
/// Responses queued for a specific agent take precedence over the shared
/// queue, which keeps concurrent turns deterministic.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Responses consumed in order by any agent.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Responses consumed in order by one agent.
    agent_responses: Arc<Mutex<HashMap<AgentKind, VecDeque<MockResponse>>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Latency overrides for single agents.
    agent_delays: HashMap<AgentKind, Duration>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success { content: String },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            agent_responses: Arc::new(Mutex::new(HashMap::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            agent_delays: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the shared queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
        });
        self
    }

    /// Adds an error response to the shared queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Adds a successful response for one agent.
    pub fn with_agent_response(self, agent: AgentKind, content: impl Into<String>) -> Self {
        self.push_agent(
            agent,
            MockResponse::Success {
                content: content.into(),
            },
        );
        self
    }

    /// Adds an error response for one agent.
    pub fn with_agent_error(self, agent: AgentKind, error: MockError) -> Self {
        self.push_agent(agent, MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets simulated latency for one agent, overriding the shared delay.
    pub fn with_agent_delay(mut self, agent: AgentKind, delay: Duration) -> Self {
        self.agent_delays.insert(agent, delay);
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    /// Returns recorded calls issued by one agent.
    pub fn calls_for(&self, agent: AgentKind) -> Vec<CompletionRequest> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.agent == Some(agent))
            .cloned()
            .collect()
    }

    fn push_agent(&self, agent: AgentKind, response: MockResponse) {
        lock(&self.agent_responses)
            .entry(agent)
            .or_default()
            .push_back(response);
    }

    /// Gets the next response for the agent, then the shared queue, then a default.
    fn next_response(&self, agent: Option<AgentKind>) -> MockResponse {
        if let Some(agent) = agent {
            if let Some(response) = lock(&self.agent_responses)
                .get_mut(&agent)
                .and_then(VecDeque::pop_front)
            {
                return response;
            }
        }

        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_MOCK_REPLY.to_string(),
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let agent = request.agent;
        lock(&self.calls).push(request);

        let delay = agent
            .and_then(|a| self.agent_delays.get(&a).copied())
            .unwrap_or(self.delay);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        match self.next_response(agent) {
            MockResponse::Success { content } => Ok(CompletionResponse {
                usage: TokenUsage::new(10, (content.len() / 4) as u32),
                content,
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::MessageRole;

    fn request() -> CompletionRequest {
        CompletionRequest::new().with_message(MessageRole::User, "Hello")
    }

    fn agent_request(agent: AgentKind) -> CompletionRequest {
        let mut req = request();
        req.agent = Some(agent);
        req
    }

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(provider.complete(request()).await.unwrap().content, "First");
        assert_eq!(provider.complete(request()).await.unwrap().content, "Second");
    }

    #[tokio::test]
    async fn returns_default_when_exhausted() {
        let provider = MockAIProvider::new();
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, DEFAULT_MOCK_REPLY);
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 30,
        });

        let err = provider.complete(request()).await.unwrap_err();
        assert_eq!(err, AIError::RateLimited { retry_after_secs: 30 });
    }

    #[tokio::test]
    async fn agent_queue_takes_precedence() {
        let provider = MockAIProvider::new()
            .with_response("shared")
            .with_agent_response(AgentKind::Reviewer, "TRUE");

        let reviewer = provider.complete(agent_request(AgentKind::Reviewer)).await.unwrap();
        assert_eq!(reviewer.content, "TRUE");

        // Reviewer queue drained, falls through to the shared queue.
        let reviewer = provider.complete(agent_request(AgentKind::Reviewer)).await.unwrap();
        assert_eq!(reviewer.content, "shared");
    }

    #[tokio::test]
    async fn agent_queue_not_used_by_other_agents() {
        let provider = MockAIProvider::new().with_agent_response(AgentKind::Reviewer, "TRUE");

        let po = provider.complete(agent_request(AgentKind::PoExpert)).await.unwrap();
        assert_eq!(po.content, DEFAULT_MOCK_REPLY);
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockAIProvider::new();

        provider.complete(request()).await.unwrap();
        provider.complete(agent_request(AgentKind::TaskOverview)).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].messages[0].content, "Hello");
        assert_eq!(provider.calls_for(AgentKind::TaskOverview).len(), 1);
    }

    #[tokio::test]
    async fn simulates_delay() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn agent_delay_overrides_shared_delay() {
        let provider = MockAIProvider::new()
            .with_delay(Duration::from_secs(30))
            .with_agent_delay(AgentKind::PoExpert, Duration::ZERO);

        let result = tokio::time::timeout(
            Duration::from_secs(1),
            provider.complete(agent_request(AgentKind::PoExpert)),
        )
        .await;
        assert!(result.is_ok());
    }

    #[test]
    fn mock_errors_convert_to_ai_errors() {
        assert_eq!(AIError::from(MockError::AuthenticationFailed), AIError::AuthenticationFailed);
        assert!(AIError::from(MockError::Network {
            message: "reset".to_string()
        })
        .is_retryable());
    }
}
