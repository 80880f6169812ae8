//! # conduit-core: Pure Domain Model for Conduit
//!
//! This crate holds the data model shared by the sync engine and the CLI:
//! platform connectors, the platform registry, sync tasks with their status
//! state machine, and the integration report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Conduit Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`conduit`)                         │   │
//! │  │           integrate ──► probe, enqueue, process, report         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 conduit-sync (async engine)                     │   │
//! │  │      Prober, PlatformCheck, SyncQueue, SyncExecutor             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ conduit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ registry  │  │  report   │  │ validation│  │   │
//! │  │   │ Connector │  │ Platform  │  │Integration│  │   route   │  │   │
//! │  │   │ SyncTask  │  │ Registry  │  │  Report   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use conduit_core::{IntegrationReport, PlatformRegistry, SyncTask};
//!
//! let mut registry = PlatformRegistry::standard();
//! registry.record_probe(&"github".into(), true);
//!
//! let tasks: Vec<SyncTask> = Vec::new();
//! let report = IntegrationReport::snapshot(&registry, &tasks, Utc::now());
//! assert!(report.connectors["github"].authenticated);
//! assert_eq!(report.sync_queue.total_tasks, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod registry;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use registry::PlatformRegistry;
pub use report::{ConnectorState, ConnectorSummary, IntegrationReport, QueueSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a platform identifier.
pub const MAX_PLATFORM_ID_LEN: usize = 64;
