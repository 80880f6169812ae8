//! # Sync Error Types
//!
//! Error types for probe, execution and configuration failures.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Probe       │  │     Execution           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  CheckFailed    │  │  ExecutionFailed        │ │
//! │  │  ConfigLoad     │  │  ProbeTimeout   │  │  ExecutionPanicked      │ │
//! │  │  ConfigSave     │  │  CheckPanicked  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Probe and execution errors are recovered per item: a probe error      │
//! │  becomes `false` for that platform, an execution error marks only      │
//! │  that task as failed. Neither ever escapes probe_all / process_all.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use conduit_core::CoreError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering all possible engine failures.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Probe Errors
    // =========================================================================
    /// A platform check returned an error.
    #[error("Connection check for {platform} failed: {reason}")]
    CheckFailed { platform: String, reason: String },

    /// A platform check did not finish within the probe timeout.
    #[error("Connection check for {platform} timed out after {timeout_ms} ms")]
    ProbeTimeout { platform: String, timeout_ms: u64 },

    /// A platform check panicked.
    #[error("Connection check for {platform} panicked: {reason}")]
    CheckPanicked { platform: String, reason: String },

    // =========================================================================
    // Execution Errors
    // =========================================================================
    /// The sync executor reported a failure for a task.
    #[error("Sync from {source_platform} to {target_platform} failed: {reason}")]
    ExecutionFailed {
        source_platform: String,
        target_platform: String,
        reason: String,
    },

    /// The sync executor panicked while running a task.
    #[error("Sync task {task_id} panicked: {reason}")]
    ExecutionPanicked { task_id: String, reason: String },

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Registry lookup, validation or state machine error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if this error came out of a single platform probe.
    pub fn is_probe_error(&self) -> bool {
        matches!(
            self,
            SyncError::CheckFailed { .. }
                | SyncError::ProbeTimeout { .. }
                | SyncError::CheckPanicked { .. }
        )
    }

    /// Returns true if this error came out of executing a sync task.
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            SyncError::ExecutionFailed { .. } | SyncError::ExecutionPanicked { .. }
        )
    }
}
