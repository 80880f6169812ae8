//! # Sync Executor
//!
//! The effect that actually moves a task's payload from its source platform
//! to its target platform. The queue only owns the status state machine; it
//! hands every pending task to a [`SyncExecutor`] and records the outcome.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use conduit_core::SyncTask;

use crate::error::SyncResult;

/// Default simulated transfer latency.
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(100);

/// Performs the cross-platform write for one sync task.
#[async_trait]
pub trait SyncExecutor: Send + Sync {
    async fn execute(&self, task: &SyncTask) -> SyncResult<()>;
}

/// Stand-in executor: logs the transfer and waits a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedExecutor {
    delay: Duration,
}

impl SimulatedExecutor {
    pub fn new(delay: Duration) -> Self {
        SimulatedExecutor { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        SimulatedExecutor::new(DEFAULT_SIMULATED_DELAY)
    }
}

#[async_trait]
impl SyncExecutor for SimulatedExecutor {
    async fn execute(&self, task: &SyncTask) -> SyncResult<()> {
        info!(
            task_id = %task.id,
            source = %task.source,
            target = %task.target,
            "Syncing from {} to {}",
            task.source,
            task.target
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
