//! In-memory FIFO job queue

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tracing::debug;

use vellum_api_types::UnifiedUploadJob;
use vellum_interfaces::{JobQueue, QueueError};

/// FIFO queue of pending upload jobs behind a tokio mutex.
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    inner: Mutex<VecDeque<UnifiedUploadJob>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn push(&self, job: UnifiedUploadJob) -> Result<(), QueueError> {
        debug!(job = %job.id, file = %job.filename, "enqueueing upload job");
        self.inner.lock().await.push_back(job);
        Ok(())
    }

    async fn pop(&self) -> Result<Option<UnifiedUploadJob>, QueueError> {
        Ok(self.inner.lock().await.pop_front())
    }

    async fn len(&self) -> Result<usize, QueueError> {
        Ok(self.inner.lock().await.len())
    }

    async fn pending(&self) -> Result<Vec<UnifiedUploadJob>, QueueError> {
        Ok(self.inner.lock().await.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use vellum_api_types::StatusKey;

    fn job(filename: &str) -> UnifiedUploadJob {
        UnifiedUploadJob {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            url: format!("http://example.com/{}", filename),
            requested_by: "Uploader".to_string(),
            ignore_warnings: false,
            leave_message: false,
            status_key: StatusKey::generate(),
            queued_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn pops_in_fifo_order() {
        let queue = InMemoryJobQueue::new();
        queue.push(job("First.png")).await.unwrap();
        queue.push(job("Second.png")).await.unwrap();

        assert_eq!(queue.len().await.unwrap(), 2);
        assert_eq!(queue.pop().await.unwrap().unwrap().filename, "First.png");
        assert_eq!(queue.pop().await.unwrap().unwrap().filename, "Second.png");
        assert!(queue.pop().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn drains_to_empty_and_stays_empty() {
        let queue = InMemoryJobQueue::new();
        queue.push(job("Only.png")).await.unwrap();
        while queue.pop().await.unwrap().is_some() {}
        assert!(queue.is_empty().await.unwrap());
        assert!(queue.pop().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pending_snapshots_without_consuming() {
        let queue = InMemoryJobQueue::new();
        queue.push(job("A.png")).await.unwrap();
        queue.push(job("B.png")).await.unwrap();

        let pending = queue.pending().await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].filename, "A.png");
        assert_eq!(queue.len().await.unwrap(), 2);
    }
}
