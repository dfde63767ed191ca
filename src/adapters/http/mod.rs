//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter; `router` merges them and applies the
//! shared tower layers. The request timeout covers every route except the
//! chat turn, which the pipeline bounds with its own per-step deadlines.

pub mod health;
pub mod user_story;

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::HealthService;

pub use user_story::UserStoryAppState;

/// Options for the shared HTTP layers.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub request_timeout: Duration,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full application router.
pub fn router(user_story: UserStoryAppState, health: HealthService, options: &HttpOptions) -> Router {
    let bounded = Router::new()
        .merge(user_story::session_routes().with_state(user_story.clone()))
        .merge(health::routes().with_state(health))
        .layer(TimeoutLayer::new(options.request_timeout));

    Router::new()
        .merge(user_story::chat_routes().with_state(user_story))
        .merge(bounded)
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(parsed)
}
