//! # Sync Task Queue
//!
//! Append-only, insertion-ordered list of sync tasks and the processor that
//! drives each pending task through its status state machine.
//!
//! ## Processing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SyncQueue::process_all                            │
//! │                                                                         │
//! │  tasks (insertion order)                                               │
//! │  ┌──────────┬──────────┬───────────┬──────────┐                        │
//! │  │ pending  │completed │  pending  │  failed  │                        │
//! │  └────┬─────┴────┬─────┴─────┬─────┴────┬─────┘                        │
//! │       │          │ skip      │          │ skip                          │
//! │       ▼          ▼           ▼          ▼                               │
//! │  executor.execute(task)  (one at a time, front to back)                │
//! │       │                                                                 │
//! │       ├── Ok(())        → Completed, completed_at = now                │
//! │       └── Err / panic   → Failed, error = detail                       │
//! │                                                                         │
//! │  Terminal tasks are never executed again, so calling process_all       │
//! │  twice is harmless. Tasks are never removed within a run.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use conduit_core::{Payload, PlatformId, SyncTask, TaskId};

use crate::error::SyncError;
use crate::executor::SyncExecutor;

// =============================================================================
// Task Ids
// =============================================================================

/// Generates time-derived task ids: `sync_<seconds>.<micros>`.
///
/// When the clock has not advanced since the previous id (or went backwards)
/// the generator moves one microsecond past the last id, so ids are unique
/// and increasing within a run.
#[derive(Debug, Default)]
pub struct TaskIdGenerator {
    last_micros: Option<i64>,
}

impl TaskIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> TaskId {
        let mut micros = now.timestamp_micros();
        if let Some(last) = self.last_micros {
            if micros <= last {
                micros = last + 1;
            }
        }
        self.last_micros = Some(micros);

        TaskId::from(format!(
            "sync_{}.{:06}",
            micros.div_euclid(1_000_000),
            micros.rem_euclid(1_000_000)
        ))
    }
}

// =============================================================================
// Process Summary
// =============================================================================

/// Outcome counts of a single `process_all` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Tasks handed to the executor in this pass.
    pub executed: usize,
    pub completed: usize,
    pub failed: usize,
}

// =============================================================================
// Sync Queue
// =============================================================================

/// The sync task queue.
#[derive(Debug, Default)]
pub struct SyncQueue {
    tasks: Vec<SyncTask>,
    ids: TaskIdGenerator,
}

impl SyncQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pending task and returns its id.
    ///
    /// Source and target are not checked against any registry here.
    pub fn enqueue(
        &mut self,
        source: impl Into<PlatformId>,
        target: impl Into<PlatformId>,
        payload: Payload,
    ) -> TaskId {
        let now = Utc::now();
        let id = self.ids.next_id(now);
        let task = SyncTask::new(id.clone(), source.into(), target.into(), payload, now);

        debug!(
            task_id = %task.id,
            source = %task.source,
            target = %task.target,
            "Queued sync task"
        );

        self.tasks.push(task);
        id
    }

    /// Executes every pending task in insertion order.
    ///
    /// Each execution runs on its own Tokio task; an error or a panic marks
    /// only that task as failed and processing continues with the next one.
    pub async fn process_all(&mut self, executor: &Arc<dyn SyncExecutor>) -> ProcessSummary {
        let mut summary = ProcessSummary::default();

        for task in self.tasks.iter_mut().filter(|t| t.is_pending()) {
            summary.executed += 1;

            let exec = Arc::clone(executor);
            let snapshot = task.clone();
            let outcome = match tokio::spawn(async move { exec.execute(&snapshot).await }).await {
                Ok(result) => result,
                Err(join_err) => Err(SyncError::ExecutionPanicked {
                    task_id: task.id.to_string(),
                    reason: join_err.to_string(),
                }),
            };

            let transition = match outcome {
                Ok(()) => {
                    summary.completed += 1;
                    task.complete(Utc::now())
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(task_id = %task.id, error = %e, "Sync task failed");
                    task.fail(e.to_string())
                }
            };

            if let Err(e) = transition {
                error!(task_id = %task.id, error = %e, "Task left pending state during processing");
            }
        }

        if summary.executed > 0 {
            info!(
                executed = summary.executed,
                completed = summary.completed,
                failed = summary.failed,
                "Processed sync queue"
            );
        } else {
            debug!("No pending sync tasks");
        }

        summary
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> &[SyncTask] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&SyncTask> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_pending()).count()
    }
}
