//! Story Assistant server binary.

use std::process::ExitCode;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use story_assistant::adapters::health::{LivenessCheck, SessionStoreCheck};
use story_assistant::adapters::http::{self, HttpOptions, UserStoryAppState};
use story_assistant::adapters::{FileInstructionSource, InMemorySessionStore, OpenAIProvider, SessionSweeper};
use story_assistant::application::{AgentRegistry, HealthService, OrchestrationPipeline};
use story_assistant::config::AppConfig;
use story_assistant::domain::agents::InstructionOrigin;
use story_assistant::ports::{AIProvider, SessionStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::from(1);
        }
    };

    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return ExitCode::from(1);
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(config: AppConfig) -> Result<(), BoxError> {
    tracing::info!("Starting Story Assistant v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    let provider_config = config.ai.provider_config()?;
    let step_timeout = provider_config.worst_case_latency();
    let provider = OpenAIProvider::new(provider_config)?;
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "Completion provider ready");

    let store = Arc::new(InMemorySessionStore::with_limits(config.session.limits()));
    let sweeper = SessionSweeper::new(store.clone(), config.session.sweep_interval(), shutdown.clone()).spawn();

    let instructions = FileInstructionSource::new(config.agents.instructions_dir.clone());
    let agents = Arc::new(AgentRegistry::load(&instructions).await);
    let from_resources = agents
        .profiles()
        .iter()
        .filter(|p| p.origin() == InstructionOrigin::Resource)
        .count();
    tracing::info!(
        dir = %config.agents.instructions_dir.display(),
        from_resources,
        "Agent instructions resolved"
    );

    let store_port: Arc<dyn SessionStore> = store;
    let pipeline = Arc::new(
        OrchestrationPipeline::new(Arc::new(provider), store_port.clone(), agents)
            .with_step_timeout(step_timeout),
    );
    tracing::debug!(step_timeout_secs = step_timeout.as_secs(), "Agent step deadline");

    let user_story = UserStoryAppState::new(pipeline)
        .with_reviewed_source(config.pipeline.reviewed_source)
        .with_shutdown(shutdown.clone());
    let health = HealthService::new()
        .with_check(Arc::new(LivenessCheck))
        .with_check(Arc::new(SessionStoreCheck::new(store_port)));
    let options = HttpOptions {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = http::router(user_story, health, &options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Story Assistant listening on http://{}", addr);

    let signal_token = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, cancelling in-flight turns");
            signal_token.cancel();
        })
        .await?;

    shutdown.cancel();
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "Session sweeper did not stop cleanly");
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
