//! Aggregates named health checks into one report.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::ports::{HealthCheck, HealthStatus};

/// Result of one named check inside a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub name: String,
    pub status: HealthStatus,
    pub description: Option<String>,
    pub duration: Duration,
}

/// Aggregate health report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Worst status among the included checks. Healthy when there are none.
    pub status: HealthStatus,
    pub checks: Vec<CheckReport>,
    pub total_duration: Duration,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Registry of health checks.
#[derive(Clone, Default)]
pub struct HealthService {
    checks: Vec<Arc<dyn HealthCheck>>,
}

impl HealthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.checks.push(check);
        self
    }

    /// Runs every check, or only those carrying `tag`.
    pub async fn report(&self, tag: Option<&str>) -> HealthReport {
        let started = Instant::now();
        let mut checks = Vec::new();

        for check in self
            .checks
            .iter()
            .filter(|c| tag.map_or(true, |t| c.tags().iter().any(|own| *own == t)))
        {
            let check_started = Instant::now();
            let result = check.check().await;
            checks.push(CheckReport {
                name: check.name().to_string(),
                status: result.status,
                description: result.description,
                duration: check_started.elapsed(),
            });
        }

        let status = checks
            .iter()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        HealthReport {
            status,
            checks,
            total_duration: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::health::LivenessCheck;
    use crate::ports::{HealthCheckResult, LIVE_TAG};
    use async_trait::async_trait;

    struct FixedCheck(&'static str, HealthStatus);

    #[async_trait]
    impl HealthCheck for FixedCheck {
        fn name(&self) -> &str {
            self.0
        }

        async fn check(&self) -> HealthCheckResult {
            HealthCheckResult {
                status: self.1,
                description: None,
            }
        }
    }

    #[tokio::test]
    async fn empty_registry_is_healthy() {
        let report = HealthService::new().report(None).await;
        assert!(report.is_healthy());
        assert!(report.checks.is_empty());
    }

    #[tokio::test]
    async fn worst_status_wins() {
        let service = HealthService::new()
            .with_check(Arc::new(LivenessCheck))
            .with_check(Arc::new(FixedCheck("slow", HealthStatus::Degraded)))
            .with_check(Arc::new(FixedCheck("down", HealthStatus::Unhealthy)));

        let report = service.report(None).await;
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.checks.len(), 3);
    }

    #[tokio::test]
    async fn tag_filter_selects_live_checks() {
        let service = HealthService::new()
            .with_check(Arc::new(LivenessCheck))
            .with_check(Arc::new(FixedCheck("down", HealthStatus::Unhealthy)));

        let report = service.report(Some(LIVE_TAG)).await;
        assert!(report.is_healthy());
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].name, "self");
    }
}
