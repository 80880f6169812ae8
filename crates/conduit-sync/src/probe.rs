//! # Connectivity Prober
//!
//! Runs one connection check per registered platform and records the result
//! on the registry.
//!
//! ## Probe Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         probe_all(registry)                             │
//! │                                                                         │
//! │  for id in registry (in order):                                        │
//! │      check = CheckTable.resolve(id)   ── unknown id → UnreachableCheck │
//! │           │                                                             │
//! │           ▼                                                             │
//! │      tokio::spawn(check.test_connection())                             │
//! │           │          (bounded by probe timeout, if any)                │
//! │           ▼                                                             │
//! │      Ok(b)            → b                                              │
//! │      Err / panic /    → false  + warn!                                 │
//! │      timeout                                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │      registry.record_probe(id, result)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each check runs on its own task so that an error, a panic or a hang in
//! one platform's check only affects that platform's result.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use conduit_core::{KnownPlatform, PlatformId, PlatformRegistry};

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Platform Check Capability
// =============================================================================

/// A connectivity check for one external platform.
///
/// Real implementations call the platform's API; returning `Ok(false)` means
/// "reachable but not authenticated", returning `Err` means the check itself
/// broke. The prober treats both as not connected.
#[async_trait]
pub trait PlatformCheck: Send + Sync {
    async fn test_connection(&self) -> SyncResult<bool>;
}

/// Stub check for a built-in platform, one variant per [`KnownPlatform`].
///
/// Every variant reports success; this is where the per-platform API client
/// plugs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCheck {
    Github,
    Linear,
    Notion,
    Email,
    Slack,
    Files,
}

impl BuiltinCheck {
    pub fn new(platform: KnownPlatform) -> Self {
        match platform {
            KnownPlatform::Github => BuiltinCheck::Github,
            KnownPlatform::Linear => BuiltinCheck::Linear,
            KnownPlatform::Notion => BuiltinCheck::Notion,
            KnownPlatform::Email => BuiltinCheck::Email,
            KnownPlatform::Slack => BuiltinCheck::Slack,
            KnownPlatform::Files => BuiltinCheck::Files,
        }
    }

    pub fn platform(&self) -> KnownPlatform {
        match self {
            BuiltinCheck::Github => KnownPlatform::Github,
            BuiltinCheck::Linear => KnownPlatform::Linear,
            BuiltinCheck::Notion => KnownPlatform::Notion,
            BuiltinCheck::Email => KnownPlatform::Email,
            BuiltinCheck::Slack => KnownPlatform::Slack,
            BuiltinCheck::Files => KnownPlatform::Files,
        }
    }

    fn simulated(&self, endpoint: &'static str) -> SyncResult<bool> {
        debug!(platform = %self.platform(), endpoint, "Simulated connection check");
        Ok(true)
    }
}

impl From<KnownPlatform> for BuiltinCheck {
    fn from(platform: KnownPlatform) -> Self {
        BuiltinCheck::new(platform)
    }
}

#[async_trait]
impl PlatformCheck for BuiltinCheck {
    async fn test_connection(&self) -> SyncResult<bool> {
        match self {
            BuiltinCheck::Github => self.simulated("GitHub REST API"),
            BuiltinCheck::Linear => self.simulated("Linear GraphQL API"),
            BuiltinCheck::Notion => self.simulated("Notion API"),
            BuiltinCheck::Email => self.simulated("Gmail API"),
            BuiltinCheck::Slack => self.simulated("Slack Web API"),
            BuiltinCheck::Files => self.simulated("file repository"),
        }
    }
}

/// Default-deny check used for any platform without a registered check.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableCheck;

#[async_trait]
impl PlatformCheck for UnreachableCheck {
    async fn test_connection(&self) -> SyncResult<bool> {
        Ok(false)
    }
}

// =============================================================================
// Check Table
// =============================================================================

/// Maps platform ids to their checks.
#[derive(Clone)]
pub struct CheckTable {
    checks: HashMap<PlatformId, Arc<dyn PlatformCheck>>,
    unreachable: Arc<dyn PlatformCheck>,
}

impl Default for CheckTable {
    fn default() -> Self {
        CheckTable {
            checks: HashMap::new(),
            unreachable: Arc::new(UnreachableCheck),
        }
    }
}

impl CheckTable {
    /// An empty table: every platform resolves to [`UnreachableCheck`].
    pub fn new() -> Self {
        Self::default()
    }

    /// One [`BuiltinCheck`] per [`KnownPlatform`].
    pub fn standard() -> Self {
        let mut table = Self::new();
        for platform in KnownPlatform::ALL {
            table.register(platform, BuiltinCheck::new(platform));
        }
        table
    }

    /// Registers (or replaces) the check for a platform.
    pub fn register(&mut self, id: impl Into<PlatformId>, check: impl PlatformCheck + 'static) {
        self.checks.insert(id.into(), Arc::new(check));
    }

    /// Removes a platform's check. Later probes of it resolve to unreachable.
    pub fn remove(&mut self, id: &PlatformId) -> bool {
        self.checks.remove(id).is_some()
    }

    pub fn contains(&self, id: &PlatformId) -> bool {
        self.checks.contains_key(id)
    }

    /// Returns the platform's check, or [`UnreachableCheck`] when none exists.
    pub fn resolve(&self, id: &PlatformId) -> Arc<dyn PlatformCheck> {
        match self.checks.get(id) {
            Some(check) => Arc::clone(check),
            None => {
                debug!(platform = %id, "No connection check registered, treating as unreachable");
                Arc::clone(&self.unreachable)
            }
        }
    }
}

// =============================================================================
// Prober
// =============================================================================

/// Runs connection checks with per-platform fault isolation.
#[derive(Clone)]
pub struct Prober {
    checks: CheckTable,
    timeout: Option<Duration>,
}

impl Prober {
    pub fn new(checks: CheckTable) -> Self {
        Prober {
            checks,
            timeout: None,
        }
    }

    /// Bounds every single check. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn checks(&self) -> &CheckTable {
        &self.checks
    }

    /// Runs one check and reports every way it can go wrong.
    pub async fn check(&self, id: &PlatformId) -> SyncResult<bool> {
        let check = self.checks.resolve(id);
        let handle = tokio::spawn(async move { check.test_connection().await });
        let abort = handle.abort_handle();

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    abort.abort();
                    return Err(SyncError::ProbeTimeout {
                        platform: id.to_string(),
                        timeout_ms: timeout_millis(limit),
                    });
                }
            },
            None => handle.await,
        };

        match joined {
            Ok(Ok(connected)) => Ok(connected),
            Ok(Err(e)) if e.is_probe_error() => Err(e),
            Ok(Err(e)) => Err(SyncError::CheckFailed {
                platform: id.to_string(),
                reason: e.to_string(),
            }),
            Err(join_err) => Err(SyncError::CheckPanicked {
                platform: id.to_string(),
                reason: join_err.to_string(),
            }),
        }
    }

    /// Probes a single platform. Never fails: any error is `false`.
    pub async fn probe(&self, id: &PlatformId) -> bool {
        match self.check(id).await {
            Ok(connected) => connected,
            Err(e) => {
                warn!(platform = %id, error = %e, "Connection check failed");
                false
            }
        }
    }

    /// Probes every registered platform in registry order and records each
    /// result on its connector.
    pub async fn probe_all(&self, registry: &mut PlatformRegistry) -> IndexMap<PlatformId, bool> {
        let ids: Vec<PlatformId> = registry.ids().cloned().collect();
        let mut results = IndexMap::with_capacity(ids.len());

        for id in ids {
            let connected = self.probe(&id).await;
            registry.record_probe(&id, connected);

            let name = registry
                .get(&id)
                .map(|c| c.display_name.as_str())
                .unwrap_or_default();
            info!(platform = %id, name, connected, "Connection tested");

            results.insert(id, connected);
        }

        results
    }
}

/// Whole milliseconds of a probe bound, saturating at `u64::MAX`.
fn timeout_millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_core::Connector;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedCheck(bool);

    #[async_trait]
    impl PlatformCheck for FixedCheck {
        async fn test_connection(&self) -> SyncResult<bool> {
            Ok(self.0)
        }
    }

    struct ErroringCheck;

    #[async_trait]
    impl PlatformCheck for ErroringCheck {
        async fn test_connection(&self) -> SyncResult<bool> {
            Err(SyncError::InvalidConfig("token revoked".into()))
        }
    }

    struct PanickingCheck;

    #[async_trait]
    impl PlatformCheck for PanickingCheck {
        async fn test_connection(&self) -> SyncResult<bool> {
            panic!("client blew up");
        }
    }

    struct HangingCheck;

    #[async_trait]
    impl PlatformCheck for HangingCheck {
        async fn test_connection(&self) -> SyncResult<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(true)
        }
    }

    struct CountingCheck(Arc<AtomicUsize>);

    #[async_trait]
    impl PlatformCheck for CountingCheck {
        async fn test_connection(&self) -> SyncResult<bool> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_standard_probe_all_connects_everything() {
        let prober = Prober::new(CheckTable::standard());
        let mut registry = PlatformRegistry::standard();

        let results = prober.probe_all(&mut registry).await;

        assert_eq!(results.len(), 6);
        assert!(results.values().all(|&ok| ok));
        assert!(registry.iter().all(|c| c.authenticated));
        let order: Vec<&str> = results.keys().map(|id| id.as_str()).collect();
        assert_eq!(order, ["github", "linear", "notion", "email", "slack", "files"]);
    }

    #[tokio::test]
    async fn test_results_match_each_check() {
        let mut checks = CheckTable::standard();
        checks.register("notion", FixedCheck(false));
        let prober = Prober::new(checks);
        let mut registry = PlatformRegistry::standard();

        let results = prober.probe_all(&mut registry).await;

        for c in registry.iter() {
            let expected = c.platform_id.as_str() != "notion";
            assert_eq!(c.authenticated, expected, "{}", c.platform_id);
            assert_eq!(results[&c.platform_id], expected);
        }
    }

    #[tokio::test]
    async fn test_unknown_platform_is_unreachable() {
        let prober = Prober::new(CheckTable::standard());
        assert!(!prober.probe(&"jira".into()).await);
        assert!(!prober.check(&"jira".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_registry_entry_without_check_defaults_to_false() {
        let prober = Prober::new(CheckTable::standard());
        let mut registry = PlatformRegistry::from_connectors([
            Connector::known(KnownPlatform::Github),
            Connector::new("jira", "Jira"),
        ]);

        let results = prober.probe_all(&mut registry).await;

        assert!(results[&PlatformId::from("github")]);
        assert!(!results[&PlatformId::from("jira")]);
        assert!(!registry.get(&"jira".into()).unwrap().authenticated);
    }

    #[tokio::test]
    async fn test_erroring_slack_check_is_isolated() {
        let mut checks = CheckTable::standard();
        checks.register("slack", ErroringCheck);
        let prober = Prober::new(checks);
        let mut registry = PlatformRegistry::standard();

        let results = prober.probe_all(&mut registry).await;

        assert!(!results[&PlatformId::from("slack")]);
        assert!(!registry.get(&"slack".into()).unwrap().authenticated);
        for (id, ok) in &results {
            if id.as_str() != "slack" {
                assert!(*ok, "{} should still be connected", id);
            }
        }
    }

    #[tokio::test]
    async fn test_error_is_wrapped_as_check_failure() {
        let mut checks = CheckTable::new();
        checks.register("slack", ErroringCheck);
        let prober = Prober::new(checks);

        let err = prober.check(&"slack".into()).await.unwrap_err();
        assert!(matches!(err, SyncError::CheckFailed { ref platform, .. } if platform == "slack"));
    }

    #[tokio::test]
    async fn test_panicking_check_is_isolated() {
        let mut checks = CheckTable::standard();
        checks.register("github", PanickingCheck);
        let prober = Prober::new(checks);
        let mut registry = PlatformRegistry::standard();

        let results = prober.probe_all(&mut registry).await;

        assert!(!results[&PlatformId::from("github")]);
        assert_eq!(results.values().filter(|&&ok| ok).count(), 5);
        assert!(matches!(
            prober.check(&"github".into()).await,
            Err(SyncError::CheckPanicked { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_check_times_out() {
        let mut checks = CheckTable::standard();
        checks.register("email", HangingCheck);
        let prober = Prober::new(checks).with_timeout(Some(Duration::from_millis(250)));
        let mut registry = PlatformRegistry::standard();

        let results = prober.probe_all(&mut registry).await;

        assert!(!results[&PlatformId::from("email")]);
        assert!(results[&PlatformId::from("files")]);
        assert!(matches!(
            prober.check(&"email".into()).await,
            Err(SyncError::ProbeTimeout { timeout_ms: 250, .. })
        ));
    }

    #[tokio::test]
    async fn test_builtin_check_per_platform() {
        for platform in KnownPlatform::ALL {
            let check = BuiltinCheck::from(platform);
            assert_eq!(check.platform(), platform);
            assert!(check.test_connection().await.unwrap());
        }
    }

    #[test]
    fn test_timeout_millis_saturates() {
        assert_eq!(timeout_millis(Duration::from_millis(250)), 250);
        assert_eq!(timeout_millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_each_platform_checked_once_per_probe() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut checks = CheckTable::new();
        for platform in KnownPlatform::ALL {
            checks.register(platform, CountingCheck(calls.clone()));
        }
        let prober = Prober::new(checks);
        let mut registry = PlatformRegistry::standard();

        prober.probe_all(&mut registry).await;
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_removed_check_becomes_unreachable() {
        let mut checks = CheckTable::standard();
        assert!(checks.remove(&"files".into()));
        assert!(!checks.contains(&"files".into()));

        let prober = Prober::new(checks);
        assert!(!prober.probe(&"files".into()).await);
    }
}
