//! Background polling for the blue-green deployment banner.
//!
//! Two independent tasks run until the monitor is shut down or dropped:
//!
//! - the version poll (default every 10 s) keeps the deployment banner
//!   current so a switch from blue to green shows up without a reload;
//! - the health poll (default every 30 s) keeps the health line current.
//!
//! Each task fetches immediately, then on its interval. A failed fetch is
//! logged by the task that made it and has no effect on the other task's
//! schedule. Latest values are published on `watch` channels.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bookverse_core::{HealthStatus, VersionInfo};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::StatusSource;
use crate::config::ShopConfig;

/// What the health line currently says.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthIndicator {
    /// No answer yet.
    #[default]
    Checking,
    Healthy(HealthStatus),
    /// The last health fetch failed.
    Unavailable,
}

impl fmt::Display for HealthIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => f.write_str("⏳ Checking..."),
            Self::Healthy(status) => f.write_str(&status.line()),
            Self::Unavailable => f.write_str("❌ Unavailable"),
        }
    }
}

/// Handle to the two polling tasks.
pub struct DeploymentMonitor {
    deployment: watch::Receiver<Option<VersionInfo>>,
    health: watch::Receiver<HealthIndicator>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl DeploymentMonitor {
    /// Start polling with the intervals from `config`.
    #[must_use]
    pub fn from_config<S: StatusSource + 'static>(source: Arc<S>, config: &ShopConfig) -> Self {
        Self::spawn(source, config.version_interval, config.health_interval)
    }

    /// Start polling `source` on the given intervals.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<S: StatusSource + 'static>(
        source: Arc<S>,
        version_interval: Duration,
        health_interval: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let (deployment_tx, deployment) = watch::channel(None);
        let (health_tx, health) = watch::channel(HealthIndicator::Checking);

        let tasks = vec![
            tokio::spawn(poll_version(
                Arc::clone(&source),
                version_interval,
                deployment_tx,
                cancel.child_token(),
            )),
            tokio::spawn(poll_health(
                source,
                health_interval,
                health_tx,
                cancel.child_token(),
            )),
        ];

        Self {
            deployment,
            health,
            cancel,
            tasks,
        }
    }

    /// Latest version report, if any fetch has succeeded.
    #[must_use]
    pub fn deployment(&self) -> Option<VersionInfo> {
        self.deployment.borrow().clone()
    }

    /// Banner text for the latest version report.
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        self.deployment.borrow().as_ref().map(VersionInfo::banner)
    }

    /// Current health line.
    #[must_use]
    pub fn health(&self) -> HealthIndicator {
        self.health.borrow().clone()
    }

    /// Receiver that is notified on every version report.
    #[must_use]
    pub fn subscribe_deployment(&self) -> watch::Receiver<Option<VersionInfo>> {
        self.deployment.clone()
    }

    /// Receiver that is notified on every health update.
    #[must_use]
    pub fn subscribe_health(&self) -> watch::Receiver<HealthIndicator> {
        self.health.clone()
    }

    /// Stop both tasks and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!("Deployment monitor task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for DeploymentMonitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn poll_version<S: StatusSource>(
    source: Arc<S>,
    period: Duration,
    tx: watch::Sender<Option<VersionInfo>>,
    cancel: CancellationToken,
) {
    let mut interval = ticker(period);
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        match source.version().await {
            Ok(info) => {
                let previous = tx.borrow().as_ref().map(|v| v.color.clone());
                if previous.as_deref().is_some_and(|color| color != info.color) {
                    tracing::info!(
                        from = previous.as_deref().unwrap_or_default(),
                        to = %info.color,
                        version = %info.version,
                        "Deployment switched"
                    );
                }
                tx.send_replace(Some(info));
            }
            Err(e) => tracing::warn!("Error fetching deployment info: {e}"),
        }
    }
}

async fn poll_health<S: StatusSource>(
    source: Arc<S>,
    period: Duration,
    tx: watch::Sender<HealthIndicator>,
    cancel: CancellationToken,
) {
    let mut interval = ticker(period);
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let indicator = match source.health().await {
            Ok(status) => HealthIndicator::Healthy(status),
            Err(e) => {
                tracing::warn!("Error fetching health status: {e}");
                HealthIndicator::Unavailable
            }
        };
        tx.send_replace(indicator);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::client::ClientError;

    #[derive(Default)]
    struct FakeStatus {
        version_calls: AtomicUsize,
        health_calls: AtomicUsize,
        health_down: AtomicBool,
    }

    impl StatusSource for FakeStatus {
        async fn version(&self) -> Result<VersionInfo, ClientError> {
            let call = self.version_calls.fetch_add(1, Ordering::SeqCst);
            Ok(VersionInfo {
                version: format!("1.0.{call}"),
                color: if call < 2 { "blue" } else { "green" }.to_string(),
                hostname: Some("web-1".to_string()),
                build_number: "7".to_string(),
            })
        }

        async fn health(&self) -> Result<HealthStatus, ClientError> {
            self.health_calls.fetch_add(1, Ordering::SeqCst);
            if self.health_down.load(Ordering::SeqCst) {
                return Err(ClientError::Status {
                    status: 503,
                    url: "http://fake/health".to_string(),
                });
            }
            Ok(HealthStatus::healthy())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_independent_schedules() {
        let source = Arc::new(FakeStatus::default());
        let monitor = DeploymentMonitor::spawn(
            Arc::clone(&source),
            Duration::from_secs(10),
            Duration::from_secs(30),
        );

        tokio::time::sleep(Duration::from_secs(25)).await;

        // Fetched at 0, 10 and 20 seconds; health only at 0.
        assert_eq!(source.version_calls.load(Ordering::SeqCst), 3);
        assert_eq!(source.health_calls.load(Ordering::SeqCst), 1);
        assert!(matches!(monitor.health(), HealthIndicator::Healthy(_)));

        monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_follows_color_switch() {
        let source = Arc::new(FakeStatus::default());
        let monitor = DeploymentMonitor::spawn(
            Arc::clone(&source),
            Duration::from_secs(10),
            Duration::from_secs(30),
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(
            monitor.banner().unwrap(),
            "🚀 Deployment: BLUE | Version: 1.0.0 | Host: web-1"
        );

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(monitor.deployment().unwrap().color, "green");

        monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_failure_does_not_stop_version_poll() {
        let source = Arc::new(FakeStatus::default());
        source.health_down.store(true, Ordering::SeqCst);
        let monitor = DeploymentMonitor::spawn(
            Arc::clone(&source),
            Duration::from_secs(10),
            Duration::from_secs(30),
        );

        tokio::time::sleep(Duration::from_secs(35)).await;

        assert_eq!(monitor.health(), HealthIndicator::Unavailable);
        assert_eq!(monitor.health().to_string(), "❌ Unavailable");
        assert_eq!(source.health_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.version_calls.load(Ordering::SeqCst), 4);
        assert!(monitor.deployment().is_some());

        monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_polling() {
        let source = Arc::new(FakeStatus::default());
        let monitor = DeploymentMonitor::spawn(
            Arc::clone(&source),
            Duration::from_secs(10),
            Duration::from_secs(30),
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        monitor.shutdown().await;
        let versions = source.version_calls.load(Ordering::SeqCst);
        let healths = source.health_calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.version_calls.load(Ordering::SeqCst), versions);
        assert_eq!(source.health_calls.load(Ordering::SeqCst), healths);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_tasks() {
        let source = Arc::new(FakeStatus::default());
        let monitor = DeploymentMonitor::spawn(
            Arc::clone(&source),
            Duration::from_secs(10),
            Duration::from_secs(30),
        );
        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(monitor);

        let versions = source.version_calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.version_calls.load(Ordering::SeqCst), versions);
    }

    #[test]
    fn test_indicator_before_first_answer() {
        assert_eq!(HealthIndicator::default().to_string(), "⏳ Checking...");
    }
}
