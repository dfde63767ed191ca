//! Route definitions for health endpoints

use axum::routing::get;
use axum::Router;

use crate::application::HealthService;

use super::handlers::{health, live};

/// - `GET /health` - All checks
/// - `GET /health/live` - Checks tagged `live`
pub fn routes() -> Router<HealthService> {
    Router::new()
        .route("/health", get(health))
        .route("/health/live", get(live))
}
