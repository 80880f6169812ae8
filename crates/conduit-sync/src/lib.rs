//! # conduit-sync: Probe & Sync Engine for Conduit
//!
//! Connectivity probes against external collaboration platforms and the
//! in-memory sync task queue that moves items between them.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ConnectorIntegrator Architecture                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   ConnectorIntegrator                            │  │
//! │  │                                                                  │  │
//! │  │  Owns the registry, prober, queue and executor of one run       │  │
//! │  │  Built through ConnectorIntegratorBuilder (no globals)          │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │    Prober      │  │   SyncQueue    │  │    SyncExecutor        │    │
//! │  │                │  │                │  │                        │    │
//! │  │ One spawned    │  │ Append-only,   │  │ Performs the transfer  │    │
//! │  │ check per      │  │ pending →      │  │ for one task           │    │
//! │  │ platform,      │  │ completed /    │  │ (simulated by default) │    │
//! │  │ bounded        │  │ failed         │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  Failures are contained per item: a broken check is `false`, a broken  │
//! │  task is `failed`. Neither aborts the run.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Sync error types
//! - [`executor`] - Transfer effect for one task
//! - [`integrator`] - Main `ConnectorIntegrator` coordinator
//! - [`probe`] - Platform checks and the prober
//! - [`queue`] - Sync task queue and processor
//!
//! ## Usage
//!
//! ```rust,ignore
//! use conduit_sync::{ConnectorIntegrator, IntegratorConfig};
//!
//! let config = IntegratorConfig::load_or_default(None);
//! let mut integrator = ConnectorIntegrator::builder().from_config(&config).build();
//!
//! integrator.test_all_connections().await;
//! integrator.create_sync_task("notion", "github", payload)?;
//! integrator.process_sync_queue().await;
//!
//! let report = integrator.generate_report();
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod executor;
pub mod integrator;
pub mod probe;
pub mod queue;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{IntegratorConfig, ProbeSettings, SyncSettings};
pub use error::{SyncError, SyncResult};
pub use executor::{SimulatedExecutor, SyncExecutor};
pub use integrator::{ConnectorIntegrator, ConnectorIntegratorBuilder};
pub use probe::{BuiltinCheck, CheckTable, PlatformCheck, Prober, UnreachableCheck};
pub use queue::{ProcessSummary, SyncQueue, TaskIdGenerator};
