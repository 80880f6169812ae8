//! # Connector Integrator
//!
//! The coordinating object: one registry, one prober, one task queue and one
//! executor, all owned by a single instance and injected through
//! [`ConnectorIntegratorBuilder`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ConnectorIntegrator                               │
//! │                                                                         │
//! │  test_all_connections ──► Prober ──► registry.authenticated            │
//! │                                                                         │
//! │  create_sync_task ──────► SyncQueue (append, pending)                  │
//! │  enqueue_checked  ──┘        │                                          │
//! │                              ▼                                          │
//! │  process_sync_queue ────► SyncExecutor per pending task                │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  generate_report ◄──── registry + queue snapshot (fresh every call)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, info};

use conduit_core::{
    validation::validate_route, IntegrationReport, Payload, PlatformId, PlatformRegistry, TaskId,
};

use crate::config::IntegratorConfig;
use crate::error::SyncResult;
use crate::executor::{SimulatedExecutor, SyncExecutor};
use crate::probe::{CheckTable, Prober};
use crate::queue::{ProcessSummary, SyncQueue};

/// Default per-probe bound when none is configured.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Connector Integrator
// =============================================================================

/// Coordinates connectivity probes, the sync queue and reporting.
pub struct ConnectorIntegrator {
    registry: PlatformRegistry,
    prober: Prober,
    queue: SyncQueue,
    executor: Arc<dyn SyncExecutor>,
    strict_platforms: bool,
}

impl Default for ConnectorIntegrator {
    fn default() -> Self {
        ConnectorIntegratorBuilder::new().build()
    }
}

impl ConnectorIntegrator {
    /// Standard registry and checks, simulated executor.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ConnectorIntegratorBuilder {
        ConnectorIntegratorBuilder::new()
    }

    /// Probes every registered platform and records the results.
    pub async fn test_all_connections(&mut self) -> IndexMap<PlatformId, bool> {
        info!(platforms = self.registry.len(), "Testing platform connections");
        self.prober.probe_all(&mut self.registry).await
    }

    /// Probes one platform and records the result if it is registered.
    pub async fn test_connection(&mut self, id: &PlatformId) -> bool {
        let connected = self.prober.probe(id).await;
        if !self.registry.record_probe(id, connected) {
            debug!(platform = %id, "Probed platform is not registered");
        }
        connected
    }

    /// Queues a sync task.
    ///
    /// Permissive by default: any source and target are accepted. With
    /// `strict_platforms` both must be registered.
    pub fn create_sync_task(
        &mut self,
        source: impl Into<PlatformId>,
        target: impl Into<PlatformId>,
        payload: Payload,
    ) -> SyncResult<TaskId> {
        let source = source.into();
        let target = target.into();
        if self.strict_platforms {
            validate_route(&self.registry, &source, &target)?;
        }
        Ok(self.queue.enqueue(source, target, payload))
    }

    /// Queues a sync task after checking both platforms are registered.
    pub fn enqueue_checked(
        &mut self,
        source: impl Into<PlatformId>,
        target: impl Into<PlatformId>,
        payload: Payload,
    ) -> SyncResult<TaskId> {
        let source = source.into();
        let target = target.into();
        validate_route(&self.registry, &source, &target)?;
        Ok(self.queue.enqueue(source, target, payload))
    }

    /// Executes every pending task.
    pub async fn process_sync_queue(&mut self) -> ProcessSummary {
        self.queue.process_all(&self.executor).await
    }

    /// Snapshot of connector states and queue counts at this instant.
    pub fn generate_report(&self) -> IntegrationReport {
        IntegrationReport::snapshot(&self.registry, self.queue.tasks(), Utc::now())
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    pub fn queue(&self) -> &SyncQueue {
        &self.queue
    }

    pub fn strict_platforms(&self) -> bool {
        self.strict_platforms
    }
}

// =============================================================================
// Builder Pattern
// =============================================================================

/// Builder for [`ConnectorIntegrator`].
pub struct ConnectorIntegratorBuilder {
    registry: Option<PlatformRegistry>,
    checks: Option<CheckTable>,
    probe_timeout: Option<Duration>,
    executor: Option<Arc<dyn SyncExecutor>>,
    strict_platforms: bool,
    config: Option<IntegratorConfig>,
}

impl Default for ConnectorIntegratorBuilder {
    fn default() -> Self {
        ConnectorIntegratorBuilder {
            registry: None,
            checks: None,
            probe_timeout: Some(DEFAULT_PROBE_TIMEOUT),
            executor: None,
            strict_platforms: false,
            config: None,
        }
    }
}

impl ConnectorIntegratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies probe, sync and credential settings from configuration.
    ///
    /// Credentials are copied onto whichever registry is in place at
    /// `build()` time.
    pub fn from_config(mut self, config: &IntegratorConfig) -> Self {
        self.probe_timeout = config.probe_timeout();
        self.executor = Some(Arc::new(SimulatedExecutor::new(config.sync_delay())));
        self.strict_platforms = config.strict_platforms();
        self.config = Some(config.clone());
        self
    }

    /// Replaces the standard six-platform registry.
    pub fn with_registry(mut self, registry: PlatformRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the standard check table.
    pub fn with_checks(mut self, checks: CheckTable) -> Self {
        self.checks = Some(checks);
        self
    }

    /// Per-probe bound; `None` waits indefinitely.
    pub fn with_probe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn SyncExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn strict_platforms(mut self, strict: bool) -> Self {
        self.strict_platforms = strict;
        self
    }

    pub fn build(self) -> ConnectorIntegrator {
        let mut registry = self.registry.unwrap_or_else(PlatformRegistry::standard);
        if let Some(config) = &self.config {
            let applied = config.apply_credentials(&mut registry);
            debug!(applied, "Applied configured credentials");
        }

        let checks = self.checks.unwrap_or_else(CheckTable::standard);
        let executor = self
            .executor
            .unwrap_or_else(|| Arc::new(SimulatedExecutor::default()));

        ConnectorIntegrator {
            registry,
            prober: Prober::new(checks).with_timeout(self.probe_timeout),
            queue: SyncQueue::new(),
            executor,
            strict_platforms: self.strict_platforms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SyncError, SyncResult};
    use crate::probe::PlatformCheck;
    use async_trait::async_trait;
    use conduit_core::{
        Connector, ConnectorState, CoreError, KnownPlatform, SyncTask, TaskStatus,
    };
    use serde_json::json;

    struct FailingCheck;

    #[async_trait]
    impl PlatformCheck for FailingCheck {
        async fn test_connection(&self) -> SyncResult<bool> {
            Err(SyncError::CheckFailed {
                platform: "slack".into(),
                reason: "workspace suspended".into(),
            })
        }
    }

    struct RejectingExecutor;

    #[async_trait]
    impl SyncExecutor for RejectingExecutor {
        async fn execute(&self, task: &SyncTask) -> SyncResult<()> {
            Err(SyncError::ExecutionFailed {
                source_platform: task.source.to_string(),
                target_platform: task.target.to_string(),
                reason: "rejected".into(),
            })
        }
    }

    fn payload(kind: &str, id: &str) -> Payload {
        let mut p = Payload::new();
        p.insert("type".into(), json!(kind));
        p.insert("id".into(), json!(id));
        p
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_scenario() {
        let mut integrator = ConnectorIntegrator::new();

        let results = integrator.test_all_connections().await;
        assert_eq!(results.len(), 6);
        assert!(results.values().all(|ok| *ok));

        integrator
            .create_sync_task("notion", "github", payload("motion_template", "123"))
            .unwrap();
        integrator
            .create_sync_task("linear", "email", payload("issue_update", "FIR-12"))
            .unwrap();

        let summary = integrator.process_sync_queue().await;
        assert_eq!(summary.completed, 2);

        let report = integrator.generate_report();
        assert_eq!(report.sync_queue.total_tasks, 2);
        assert_eq!(report.sync_queue.completed, 2);
        assert_eq!(report.sync_queue.pending, 0);
        assert_eq!(report.sync_queue.failed, 0);
        assert_eq!(report.connectors.len(), 6);
        assert!(report
            .connectors
            .values()
            .all(|c| c.authenticated && c.status == ConnectorState::Active));
    }

    #[tokio::test]
    async fn test_failing_slack_check_is_isolated() {
        let mut checks = CheckTable::standard();
        checks.register(KnownPlatform::Slack, FailingCheck);
        let mut integrator = ConnectorIntegrator::builder().with_checks(checks).build();

        let results = integrator.test_all_connections().await;
        assert!(!results[&PlatformId::from("slack")]);
        assert_eq!(results.values().filter(|ok| **ok).count(), 5);

        let report = integrator.generate_report();
        let slack = &report.connectors["slack"];
        assert!(!slack.authenticated);
        assert_eq!(slack.status, ConnectorState::Inactive);
        assert_eq!(report.connectors["github"].status, ConnectorState::Active);
    }

    #[tokio::test]
    async fn test_report_before_processing_shows_pending() {
        let mut integrator = ConnectorIntegrator::new();
        integrator
            .create_sync_task("notion", "github", payload("motion_template", "123"))
            .unwrap();

        let report = integrator.generate_report();
        assert_eq!(report.sync_queue.total_tasks, 1);
        assert_eq!(report.sync_queue.pending, 1);
        assert_eq!(report.sync_queue.completed, 0);
    }

    #[tokio::test]
    async fn test_report_before_probing_is_inactive() {
        let integrator = ConnectorIntegrator::new();
        let report = integrator.generate_report();
        assert!(report
            .connectors
            .values()
            .all(|c| !c.authenticated && c.status == ConnectorState::Inactive));
        assert_eq!(report.sync_queue.total_tasks, 0);
    }

    #[tokio::test]
    async fn test_report_json_shape() {
        let mut integrator = ConnectorIntegrator::new();
        integrator.test_all_connections().await;
        let rendered = serde_json::to_string(&integrator.generate_report()).unwrap();
        let report: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert!(report["timestamp"].is_string());
        assert_eq!(report["connectors"]["email"]["status"], "active");
        assert_eq!(report["sync_queue"]["total_tasks"], 0);

        // Connector keys appear in registry order in the rendered text.
        let positions: Vec<usize> = ["github", "linear", "notion", "email", "slack", "files"]
            .iter()
            .map(|id| rendered.find(&format!("\"{}\":", id)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_execution_failure_counts_in_report() {
        let mut integrator = ConnectorIntegrator::builder()
            .with_executor(Arc::new(RejectingExecutor))
            .build();
        let id = integrator
            .create_sync_task("notion", "github", Payload::new())
            .unwrap();

        integrator.process_sync_queue().await;

        let task = integrator.queue().get(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(integrator.generate_report().sync_queue.failed, 1);
    }

    #[tokio::test]
    async fn test_create_sync_task_is_permissive_by_default() {
        let mut integrator = ConnectorIntegrator::new();
        assert!(integrator
            .create_sync_task("jira", "trello", Payload::new())
            .is_ok());
        assert_eq!(integrator.queue().len(), 1);
    }

    #[tokio::test]
    async fn test_strict_platforms_rejects_unknown_route() {
        let mut integrator = ConnectorIntegrator::builder().strict_platforms(true).build();
        let err = integrator
            .create_sync_task("notion", "jira", Payload::new())
            .unwrap_err();

        assert!(matches!(err, SyncError::Core(CoreError::UnknownPlatform(ref p)) if p == "jira"));
        assert!(integrator.queue().is_empty());
    }

    #[tokio::test]
    async fn test_enqueue_checked() {
        let mut integrator = ConnectorIntegrator::new();
        assert!(integrator
            .enqueue_checked("trello", "github", Payload::new())
            .is_err());
        assert!(integrator
            .enqueue_checked("files", "slack", Payload::new())
            .is_ok());
        assert_eq!(integrator.queue().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_registry_is_isolated() {
        let registry = PlatformRegistry::from_connectors([
            Connector::known(KnownPlatform::Github),
            Connector::new("jira", "Jira"),
        ]);
        let mut integrator = ConnectorIntegrator::builder().with_registry(registry).build();

        let results = integrator.test_all_connections().await;
        assert_eq!(results.len(), 2);
        assert!(results[&PlatformId::from("github")]);
        assert!(!results[&PlatformId::from("jira")]);

        // A fresh default integrator still sees the standard six.
        assert_eq!(ConnectorIntegrator::new().registry().len(), 6);
    }

    #[tokio::test]
    async fn test_injected_registry_is_inactive_until_tested() {
        let mut github = Connector::new("github", "GitHub");
        github.authenticated = true;
        let mut integrator = ConnectorIntegrator::builder()
            .with_registry(PlatformRegistry::from_connectors([github]))
            .build();

        let report = integrator.generate_report();
        assert!(!report.connectors["github"].authenticated);
        assert_eq!(report.connectors["github"].status, ConnectorState::Inactive);

        integrator.test_all_connections().await;
        assert_eq!(
            integrator.generate_report().connectors["github"].status,
            ConnectorState::Active
        );
    }

    #[tokio::test]
    async fn test_single_connection_test() {
        let mut integrator = ConnectorIntegrator::new();
        let github = PlatformId::from("github");

        assert!(integrator.test_connection(&github).await);
        assert!(integrator.registry().get(&github).unwrap().authenticated);
        assert!(!integrator.test_connection(&PlatformId::from("jira")).await);
    }

    #[tokio::test]
    async fn test_from_config() {
        let mut config = IntegratorConfig::default();
        config.sync.strict_platforms = true;
        config.probe.timeout_ms = 0;
        config.credentials.insert("notion".into(), "secret_abc".into());

        let mut integrator = ConnectorIntegrator::builder().from_config(&config).build();
        assert!(integrator.strict_platforms());

        let notion = integrator.registry().get(&PlatformId::from("notion")).unwrap();
        assert_eq!(notion.credential.as_deref(), Some("secret_abc"));

        assert!(integrator
            .create_sync_task("notion", "unknown", Payload::new())
            .is_err());
    }
}
