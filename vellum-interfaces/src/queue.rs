//! Job queue interface
//!
//! Deferred uploads travel through a FIFO queue that the processor (or a
//! test harness) drains explicitly. The contract is deliberately small:
//! push, pop, inspect. Retry and scheduling policy live with the caller.

use async_trait::async_trait;
use vellum_api_types::UnifiedUploadJob;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue is closed")]
    Closed,

    #[error("Internal queue error: {message}")]
    Internal { message: String },
}

/// FIFO queue of pending upload jobs.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job at the tail.
    async fn push(&self, job: UnifiedUploadJob) -> Result<(), QueueError>;

    /// Pop the oldest job, or `None` when the queue is empty.
    async fn pop(&self) -> Result<Option<UnifiedUploadJob>, QueueError>;

    /// Jobs currently waiting (pushed and not yet popped).
    async fn len(&self) -> Result<usize, QueueError>;

    async fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.len().await? == 0)
    }

    /// Snapshot of the waiting jobs, oldest first.
    async fn pending(&self) -> Result<Vec<UnifiedUploadJob>, QueueError>;
}
