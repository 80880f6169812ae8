//! # Domain Types
//!
//! Core domain types used throughout Conduit.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Connector     │   │    SyncTask     │   │   TaskStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  platform_id    │   │  id (TaskId)    │   │  Pending        │       │
//! │  │  display_name   │   │  source/target  │   │  Completed      │       │
//! │  │  authenticated  │   │  payload        │   │  Failed         │       │
//! │  │  credential     │   │  status         │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │   PlatformId    │   │  KnownPlatform  │                              │
//! │  │  open newtype   │   │  closed set of  │                              │
//! │  │  (any string)   │   │  built-ins      │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Task State Machine
//! ```text
//!              complete()
//!   Pending ──────────────► Completed
//!      │
//!      │ fail()
//!      ▼
//!   Failed
//! ```
//! Completed and Failed are terminal. Any other transition is rejected with
//! [`CoreError::InvalidTransition`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Platform Identity
// =============================================================================

/// Identifier of an external platform (e.g. `"github"`).
///
/// Open string: the built-in registry only uses
/// [`KnownPlatform`] ids, but tests and configuration may name others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(id: impl Into<String>) -> Self {
        PlatformId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the built-in platform this id names, if any.
    pub fn known(&self) -> Option<KnownPlatform> {
        self.0.parse().ok()
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformId {
    fn from(s: &str) -> Self {
        PlatformId(s.to_string())
    }
}

impl From<String> for PlatformId {
    fn from(s: String) -> Self {
        PlatformId(s)
    }
}

impl From<KnownPlatform> for PlatformId {
    fn from(p: KnownPlatform) -> Self {
        PlatformId(p.as_str().to_string())
    }
}

impl AsRef<str> for PlatformId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The closed set of platforms Conduit ships connectors for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownPlatform {
    Github,
    Linear,
    Notion,
    Email,
    Slack,
    Files,
}

impl KnownPlatform {
    /// All built-in platforms, in registry order.
    pub const ALL: [KnownPlatform; 6] = [
        KnownPlatform::Github,
        KnownPlatform::Linear,
        KnownPlatform::Notion,
        KnownPlatform::Email,
        KnownPlatform::Slack,
        KnownPlatform::Files,
    ];

    /// Registry key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            KnownPlatform::Github => "github",
            KnownPlatform::Linear => "linear",
            KnownPlatform::Notion => "notion",
            KnownPlatform::Email => "email",
            KnownPlatform::Slack => "slack",
            KnownPlatform::Files => "files",
        }
    }

    /// Human-readable name shown in summaries.
    pub const fn display_name(&self) -> &'static str {
        match self {
            KnownPlatform::Github => "GitHub",
            KnownPlatform::Linear => "Linear",
            KnownPlatform::Notion => "Notion",
            KnownPlatform::Email => "Gmail",
            KnownPlatform::Slack => "Slack",
            KnownPlatform::Files => "File Repository",
        }
    }
}

impl fmt::Display for KnownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KnownPlatform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownPlatform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPlatform(s.to_string()))
    }
}

// =============================================================================
// Connector
// =============================================================================

/// In-memory record of one external platform's authentication state.
#[derive(Clone, Serialize, Deserialize)]
pub struct Connector {
    /// Registry key.
    pub platform_id: PlatformId,

    /// Name shown to humans ("GitHub", "Gmail", ...).
    pub display_name: String,

    /// Result of the most recent probe. False until a probe has run.
    pub authenticated: bool,

    /// Credential placeholder (API key, token). Never serialized.
    #[serde(skip_serializing, default)]
    pub credential: Option<String>,
}

impl Connector {
    pub fn new(platform_id: impl Into<PlatformId>, display_name: impl Into<String>) -> Self {
        Connector {
            platform_id: platform_id.into(),
            display_name: display_name.into(),
            authenticated: false,
            credential: None,
        }
    }

    /// Connector for a built-in platform.
    pub fn known(platform: KnownPlatform) -> Self {
        Connector::new(platform, platform.display_name())
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("platform_id", &self.platform_id)
            .field("display_name", &self.display_name)
            .field("authenticated", &self.authenticated)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// =============================================================================
// Sync Task
// =============================================================================

/// Unique identifier of a sync task within a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

/// Opaque key-value data carried by a sync task.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The status of a sync task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Waiting to be processed.
    #[default]
    Pending,
    /// Executed successfully.
    Completed,
    /// Execution returned an error.
    Failed,
}

impl TaskStatus {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A unit of work moving data from one platform to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncTask {
    pub id: TaskId,
    pub source: PlatformId,
    pub target: PlatformId,
    pub payload: Payload,
    pub created_at: DateTime<Utc>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncTask {
    /// Creates a pending task.
    pub fn new(
        id: TaskId,
        source: PlatformId,
        target: PlatformId,
        payload: Payload,
        created_at: DateTime<Utc>,
    ) -> Self {
        SyncTask {
            id,
            source,
            target,
            payload,
            created_at,
            status: TaskStatus::Pending,
            completed_at: None,
            error: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Pending → Completed.
    pub fn complete(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        self.ensure_pending()?;
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
        Ok(())
    }

    /// Pending → Failed, keeping the error detail.
    pub fn fail(&mut self, error: impl Into<String>) -> CoreResult<()> {
        self.ensure_pending()?;
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        Ok(())
    }

    fn ensure_pending(&self) -> CoreResult<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                task_id: self.id.clone(),
                status: self.status,
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
