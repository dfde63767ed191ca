//! Health Check Port - Named probes aggregated by the health endpoint.

use async_trait::async_trait;
use serde::Serialize;

/// Tag for checks that belong on the liveness endpoint.
pub const LIVE_TAG: &str = "live";

/// Status of a single probe or of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Outcome of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub description: Option<String>,
}

impl HealthCheckResult {
    pub fn healthy(description: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            description: Some(description.into()),
        }
    }

    pub fn degraded(description: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            description: Some(description.into()),
        }
    }

    pub fn unhealthy(description: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            description: Some(description.into()),
        }
    }
}

/// Port for a named health probe
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Stable name shown in the health report.
    fn name(&self) -> &str;

    /// Tags used to select subsets of checks (e.g. [`LIVE_TAG`]).
    fn tags(&self) -> &[&'static str] {
        &[]
    }

    async fn check(&self) -> HealthCheckResult;
}
