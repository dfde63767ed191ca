//! HTTP handlers for health endpoints

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::{HealthReport, HealthService};
use crate::ports::{HealthStatus, LIVE_TAG};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: Vec<CheckResponse>,
    pub total_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: report.status,
            checks: report
                .checks
                .into_iter()
                .map(|c| CheckResponse {
                    name: c.name,
                    status: c.status,
                    description: c.description,
                })
                .collect(),
            total_duration_ms: u64::try_from(report.total_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

fn respond(report: HealthReport) -> impl IntoResponse {
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthResponse::from(report)))
}

/// Run every registered check
///
/// GET /health
pub async fn health(State(service): State<HealthService>) -> impl IntoResponse {
    respond(service.report(None).await)
}

/// Run only liveness checks
///
/// GET /health/live
pub async fn live(State(service): State<HealthService>) -> impl IntoResponse {
    respond(service.report(Some(LIVE_TAG)).await)
}
