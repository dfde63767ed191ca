//! Concurrency tests for the chat handler.
//!
//! Distinct sessions must never observe each other's history, and turns on
//! one session must not lose each other's messages.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use story_assistant::adapters::storage::InMemorySessionStore;
use story_assistant::application::{
    AgentRegistry, OrchestrationPipeline, ProcessMessageCommand, ProcessMessageHandler,
    SessionLocks,
};
use story_assistant::domain::agents::AgentKind;
use story_assistant::domain::conversation::MessageRole;
use story_assistant::domain::foundation::SessionId;
use story_assistant::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    SessionStore, TokenUsage,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Echoes the last user message back, after a short pause so turns overlap.
struct EchoProvider;

#[async_trait]
impl AIProvider for EchoProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        tokio::time::sleep(Duration::from_millis(5)).await;

        let content = match request.agent {
            Some(AgentKind::Reviewer) => "false".to_string(),
            _ => {
                let last_user = request
                    .messages
                    .iter()
                    .rev()
                    .find(|m| m.role == MessageRole::User)
                    .map(|m| m.content.clone())
                    .unwrap_or_default();
                format!("eco: {}", last_user)
            }
        };

        Ok(CompletionResponse {
            content,
            usage: TokenUsage::default(),
            model: "echo".to_string(),
            finish_reason: FinishReason::Stop,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("echo", "echo")
    }
}

fn setup() -> (Arc<ProcessMessageHandler>, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let pipeline = Arc::new(OrchestrationPipeline::new(
        Arc::new(EchoProvider),
        store.clone(),
        Arc::new(AgentRegistry::with_fallbacks()),
    ));
    let handler = Arc::new(ProcessMessageHandler::new(pipeline, SessionLocks::new()));
    (handler, store)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn distinct_sessions_never_share_history() {
    let (handler, store) = setup();

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let handler = handler.clone();
            tokio::spawn(async move {
                let session = format!("sessao-{}", i);
                for turn in 0..3 {
                    let cmd = ProcessMessageCommand::new(format!("{}:{}", session, turn))
                        .with_session_id(session.clone());
                    handler.handle(cmd, &CancellationToken::new()).await.unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(store.count().await.unwrap(), 16);
    for i in 0..16 {
        let id = SessionId::new(format!("sessao-{}", i)).unwrap();
        let session = store.load(&id).await.unwrap().unwrap();
        let history = session.history();

        assert_eq!(history.len(), 6);
        for message in history.iter() {
            assert!(
                message.content().contains(&format!("sessao-{}:", i)),
                "session {} saw foreign message {:?}",
                i,
                message.content()
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_session_turns_are_not_lost() {
    let (handler, store) = setup();

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let handler = handler.clone();
            tokio::spawn(async move {
                let cmd = ProcessMessageCommand::new(format!("msg-{}", i)).with_session_id("shared");
                handler.handle(cmd, &CancellationToken::new()).await.unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let session = store
        .load(&SessionId::new("shared").unwrap())
        .await
        .unwrap()
        .unwrap();
    let messages = session.history().messages();
    assert_eq!(messages.len(), 16);

    // Turns are appended whole: every user message is directly followed by its echo.
    for pair in messages.chunks(2) {
        assert_eq!(pair[0].role(), MessageRole::User);
        assert_eq!(pair[1].content(), format!("eco: {}", pair[0].content()));
    }
}

#[tokio::test]
async fn fresh_session_id_retrieves_turn() {
    let (handler, store) = setup();

    let result = handler
        .handle(ProcessMessageCommand::new("olá"), &CancellationToken::new())
        .await
        .unwrap();

    let session = store.load(&result.session_id).await.unwrap().unwrap();
    assert_eq!(session.history().count_role(MessageRole::User), 1);
    assert_eq!(session.history().count_role(MessageRole::Assistant), 1);
    assert_eq!(result.reply, "eco: olá");
}
