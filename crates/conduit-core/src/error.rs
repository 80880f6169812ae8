//! # Error Types
//!
//! Domain-specific error types for conduit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  conduit-core errors (this file)                                       │
//! │  ├── CoreError        - Registry lookups and task transitions          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  conduit-sync errors (separate crate)                                  │
//! │  └── SyncError        - Probe, execution and config failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SyncError → CLI (anyhow)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{TaskId, TaskStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Platform identifier is not present in the registry.
    ///
    /// Only raised by explicit validation. Probing an unknown platform never
    /// produces this error; it resolves to "unreachable" instead.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// A task was asked to leave a terminal state.
    ///
    /// ## When This Occurs
    /// - Completing a task that already failed
    /// - Failing a task that already completed
    /// - Processing the same task twice
    #[error("Task {task_id} is {status}, only pending tasks can transition")]
    InvalidTransition { task_id: TaskId, status: TaskStatus },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
