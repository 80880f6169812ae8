//! # Integration Report
//!
//! Point-in-time, read-only summary of connector and queue state.
//!
//! ## Output Shape
//! ```text
//! {
//!   "timestamp": "2026-10-16T09:30:00Z",
//!   "connectors": {
//!     "github": { "authenticated": true,  "status": "active"   },
//!     "slack":  { "authenticated": false, "status": "inactive" }
//!   },
//!   "sync_queue": { "total_tasks": 2, "pending": 0, "completed": 2, "failed": 0 }
//! }
//! ```
//! Field names and the two status literals are a stable output contract.
//!
//! A report is computed from the state it is given and nothing else; there
//! is no caching, so building one after every mutation always reflects it.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::registry::PlatformRegistry;
use crate::types::{SyncTask, TaskStatus};

/// Derived connector label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorState {
    Active,
    Inactive,
}

impl From<bool> for ConnectorState {
    fn from(authenticated: bool) -> Self {
        if authenticated {
            ConnectorState::Active
        } else {
            ConnectorState::Inactive
        }
    }
}

/// One connector's entry in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorSummary {
    pub authenticated: bool,
    pub status: ConnectorState,
}

/// Aggregate counts over the sync queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSummary {
    pub total_tasks: usize,
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
}

impl QueueSummary {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a SyncTask>) -> Self {
        tasks
            .into_iter()
            .fold(QueueSummary::default(), |mut summary, task| {
                summary.total_tasks += 1;
                match task.status {
                    TaskStatus::Pending => summary.pending += 1,
                    TaskStatus::Completed => summary.completed += 1,
                    TaskStatus::Failed => summary.failed += 1,
                }
                summary
            })
    }
}

/// Snapshot of registry authentication state and queue counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationReport {
    pub timestamp: DateTime<Utc>,
    pub connectors: IndexMap<String, ConnectorSummary>,
    pub sync_queue: QueueSummary,
}

impl IntegrationReport {
    /// Builds a report from the given state without mutating it.
    pub fn snapshot<'a>(
        registry: &PlatformRegistry,
        tasks: impl IntoIterator<Item = &'a SyncTask>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let connectors = registry
            .iter()
            .map(|c| {
                (
                    c.platform_id.to_string(),
                    ConnectorSummary {
                        authenticated: c.authenticated,
                        status: c.authenticated.into(),
                    },
                )
            })
            .collect();

        IntegrationReport {
            timestamp,
            connectors,
            sync_queue: QueueSummary::from_tasks(tasks),
        }
    }
}
