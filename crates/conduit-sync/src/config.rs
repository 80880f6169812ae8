//! # Integrator Configuration
//!
//! Configuration for probes, queue processing and platform credentials.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CONDUIT_PROBE_TIMEOUT_MS=2000                                      │
//! │     CONDUIT_GITHUB_CREDENTIAL=ghp_...                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/conduit/integrator.toml (Linux)                          │
//! │     ~/Library/Application Support/conduit/integrator.toml (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     5 s probe timeout, 100 ms simulated sync, permissive enqueue       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # integrator.toml
//! [probe]
//! timeout_ms = 5000          # 0 = unbounded
//!
//! [sync]
//! simulated_delay_ms = 100
//! strict_platforms = false
//!
//! [credentials]
//! github = "ghp_..."
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use conduit_core::{validation::validate_platform_id, KnownPlatform, PlatformId, PlatformRegistry};

use crate::error::{SyncError, SyncResult};

/// Upper bound accepted for the per-probe timeout.
pub const MAX_PROBE_TIMEOUT_MS: u64 = 300_000;

// =============================================================================
// Probe Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Per-platform connection check bound (milliseconds). 0 disables it.
    #[serde(default = "default_probe_timeout")]
    pub timeout_ms: u64,
}

fn default_probe_timeout() -> u64 {
    5_000
}

impl Default for ProbeSettings {
    fn default() -> Self {
        ProbeSettings {
            timeout_ms: default_probe_timeout(),
        }
    }
}

// =============================================================================
// Sync Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Latency of the simulated executor (milliseconds).
    #[serde(default = "default_simulated_delay")]
    pub simulated_delay_ms: u64,

    /// Reject sync tasks whose source or target is not registered.
    #[serde(default)]
    pub strict_platforms: bool,
}

fn default_simulated_delay() -> u64 {
    100
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            simulated_delay_ms: default_simulated_delay(),
            strict_platforms: false,
        }
    }
}

// =============================================================================
// Integrator Configuration
// =============================================================================

/// Complete integrator configuration.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    #[serde(default)]
    pub probe: ProbeSettings,

    #[serde(default)]
    pub sync: SyncSettings,

    /// Credential placeholders keyed by platform id.
    #[serde(default)]
    pub credentials: BTreeMap<String, String>,
}

impl std::fmt::Debug for IntegratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegratorConfig")
            .field("probe", &self.probe)
            .field("sync", &self.sync)
            .field("credentials", &self.credentials.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl IntegratorConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist. The default location is
    /// optional and falls back to defaults when absent.
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = &config_path {
            if !path.exists() {
                return Err(SyncError::ConfigLoadFailed(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading integrator config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load integrator config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Integrator config saved");
        Ok(())
    }

    pub fn validate(&self) -> SyncResult<()> {
        if self.probe.timeout_ms > MAX_PROBE_TIMEOUT_MS {
            return Err(SyncError::InvalidConfig(format!(
                "probe.timeout_ms must be at most {}, got {}",
                MAX_PROBE_TIMEOUT_MS, self.probe.timeout_ms
            )));
        }

        for platform in self.credentials.keys() {
            validate_platform_id(platform).map_err(|e| {
                SyncError::InvalidConfig(format!("credentials.{}: {}", platform, e))
            })?;
        }

        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    ///
    /// Unparseable numeric or boolean values are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("CONDUIT_PROBE_TIMEOUT_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => {
                    debug!(timeout_ms = ms, "Overriding probe timeout from environment");
                    self.probe.timeout_ms = ms;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid CONDUIT_PROBE_TIMEOUT_MS"),
            }
        }

        if let Some(raw) = lookup("CONDUIT_SYNC_DELAY_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => self.sync.simulated_delay_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid CONDUIT_SYNC_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("CONDUIT_STRICT_PLATFORMS") {
            match parse_flag(&raw) {
                Some(flag) => self.sync.strict_platforms = flag,
                None => warn!(value = %raw, "Ignoring invalid CONDUIT_STRICT_PLATFORMS"),
            }
        }

        // Built-in platforms plus anything already named in the file.
        let mut platforms: Vec<String> = KnownPlatform::ALL
            .iter()
            .map(|p| p.as_str().to_string())
            .collect();
        for key in self.credentials.keys() {
            if !platforms.contains(key) {
                platforms.push(key.clone());
            }
        }

        for platform in platforms {
            let var = format!("CONDUIT_{}_CREDENTIAL", platform.to_uppercase().replace('-', "_"));
            if let Some(credential) = lookup(&var) {
                debug!(platform = %platform, "Overriding credential from environment");
                self.credentials.insert(platform, credential);
            }
        }
    }

    /// Copies configured credentials onto matching registry connectors.
    ///
    /// Returns how many connectors received a credential.
    pub fn apply_credentials(&self, registry: &mut PlatformRegistry) -> usize {
        let mut applied = 0;
        for (platform, credential) in &self.credentials {
            let id = PlatformId::from(platform.as_str());
            if registry.set_credential(&id, credential.clone()) {
                applied += 1;
            } else {
                warn!(platform = %id, "Credential configured for unregistered platform");
            }
        }
        applied
    }

    /// Default file location: `<config dir>/conduit/integrator.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "conduit")
            .map(|dirs| dirs.config_dir().join("integrator.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Per-probe bound; `None` when disabled.
    pub fn probe_timeout(&self) -> Option<Duration> {
        match self.probe.timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn sync_delay(&self) -> Duration {
        Duration::from_millis(self.sync.simulated_delay_ms)
    }

    pub fn strict_platforms(&self) -> bool {
        self.sync.strict_platforms
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = IntegratorConfig::default();
        assert_eq!(config.probe_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.sync_delay(), Duration::from_millis(100));
        assert!(!config.strict_platforms());
        assert!(config.credentials.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_unbounded() {
        let mut config = IntegratorConfig::default();
        config.probe.timeout_ms = 0;
        assert_eq!(config.probe_timeout(), None);
    }

    #[test]
    fn test_config_validation() {
        let mut config = IntegratorConfig::default();
        config.probe.timeout_ms = MAX_PROBE_TIMEOUT_MS + 1;
        assert!(config.validate().unwrap_err().is_config_error());

        let mut config = IntegratorConfig::default();
        config.credentials.insert("Not A Platform".into(), "x".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: IntegratorConfig = toml::from_str(
            r#"
            [sync]
            strict_platforms = true

            [credentials]
            github = "ghp_test"
            "#,
        )
        .unwrap();

        assert!(config.strict_platforms());
        assert_eq!(config.probe.timeout_ms, 5_000);
        assert_eq!(config.sync.simulated_delay_ms, 100);
        assert_eq!(config.credentials["github"], "ghp_test");
    }

    #[test]
    fn test_overrides() {
        let env = vars(&[
            ("CONDUIT_PROBE_TIMEOUT_MS", "250"),
            ("CONDUIT_SYNC_DELAY_MS", "not-a-number"),
            ("CONDUIT_STRICT_PLATFORMS", "yes"),
            ("CONDUIT_SLACK_CREDENTIAL", "xoxb-123"),
        ]);

        let mut config = IntegratorConfig::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.probe.timeout_ms, 250);
        assert_eq!(config.sync.simulated_delay_ms, 100);
        assert!(config.strict_platforms());
        assert_eq!(config.credentials["slack"], "xoxb-123");
    }

    #[test]
    fn test_override_for_custom_platform_credential() {
        let env = vars(&[("CONDUIT_GOOGLE_DRIVE_CREDENTIAL", "token")]);

        let mut config = IntegratorConfig::default();
        config
            .credentials
            .insert("google-drive".into(), "from-file".into());
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.credentials["google-drive"], "token");
    }

    #[test]
    fn test_apply_credentials() {
        let mut config = IntegratorConfig::default();
        config.credentials.insert("github".into(), "ghp_abc".into());
        config.credentials.insert("jira".into(), "secret".into());

        let mut registry = PlatformRegistry::standard();
        assert_eq!(config.apply_credentials(&mut registry), 1);

        let github = registry.get(&PlatformId::from("github")).unwrap();
        assert_eq!(github.credential.as_deref(), Some("ghp_abc"));
        assert!(!github.authenticated);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let mut config = IntegratorConfig::default();
        config.credentials.insert("github".into(), "ghp_secret".into());
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("github"));
        assert!(!rendered.contains("ghp_secret"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("integrator.toml");

        let mut config = IntegratorConfig::default();
        config.probe.timeout_ms = 750;
        config.sync.strict_platforms = true;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: IntegratorConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_falls_back_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = IntegratorConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.sync.simulated_delay_ms, 100);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = IntegratorConfig::load(Some(path.clone())).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("integrator.toml");
        std::fs::write(&path, "[sync]\nsimulated_delay_ms = 40\n").unwrap();

        let config = IntegratorConfig::load(Some(path)).unwrap();
        assert_eq!(config.probe.timeout_ms, 5_000);
        assert_eq!(config.sync.simulated_delay_ms, 40);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("integrator.toml");
        std::fs::write(&path, "[probe]\ntimeout_ms = \"soon\"\n").unwrap();

        let err = IntegratorConfig::load(Some(path)).unwrap_err();
        assert!(err.is_config_error());
    }
}
