//! Job processor service for queued copy uploads
//!
//! Pops upload jobs off the FIFO queue and runs them through the shared
//! pipeline. [`UploadJobProcessor::run_next`] executes exactly one job, so
//! callers that need deterministic draining (tests, maintenance scripts)
//! can step the queue; [`UploadJobProcessor::start`] runs the same logic on
//! a poll loop for server deployments.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use vellum_api_types::UploadResult;
use vellum_core::{UploadError, UploadPipeline};
use vellum_interfaces::{JobQueue, QueueError};

/// Configuration for the job processor service
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Poll interval for checking new jobs (in seconds)
    pub poll_interval_seconds: u64,
    /// Maximum number of jobs to process per batch
    pub batch_size: usize,
    /// Enable automatic job processing
    pub enabled: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: 5,
            batch_size: 10,
            enabled: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),
}

/// Drains the upload job queue through the shared pipeline.
pub struct UploadJobProcessor {
    queue: Arc<dyn JobQueue>,
    pipeline: UploadPipeline,
    config: ProcessorConfig,
    is_running: AtomicBool,
}

impl UploadJobProcessor {
    pub fn new(queue: Arc<dyn JobQueue>, pipeline: UploadPipeline, config: ProcessorConfig) -> Self {
        Self {
            queue,
            pipeline,
            config,
            is_running: AtomicBool::new(false),
        }
    }

    /// Pop and execute the oldest queued job. Returns the job's terminal
    /// result, or `None` when the queue was empty.
    pub async fn run_next(&self) -> Result<Option<UploadResult>, ProcessError> {
        let Some(job) = self.queue.pop().await? else {
            return Ok(None);
        };
        debug!(job = %job.id, file = %job.filename, "processing upload job");
        let result = self.pipeline.execute_job(&job).await?;
        Ok(Some(result))
    }

    /// Process up to `batch_size` jobs.
    pub async fn process_batch(&self) -> Result<usize, ProcessError> {
        let mut processed = 0;
        while processed < self.config.batch_size {
            match self.run_next().await? {
                Some(result) => {
                    processed += 1;
                    if result == UploadResult::Failed {
                        warn!("upload job finished as Failed");
                    }
                }
                None => break,
            }
        }
        Ok(processed)
    }

    /// Start the poll loop. Runs until [`stop`](Self::stop) is called.
    pub async fn start(&self) {
        if !self.config.enabled {
            info!("Upload job processor is disabled");
            return;
        }

        if self.is_running.swap(true, Ordering::Relaxed) {
            warn!("Upload job processor is already running");
            return;
        }

        info!(
            "Starting upload job processor with {} second poll interval",
            self.config.poll_interval_seconds
        );

        while self.is_running.load(Ordering::Relaxed) {
            match self.process_batch().await {
                Ok(0) => {}
                Ok(count) => debug!("processed {} upload jobs", count),
                Err(e) => error!("Error processing upload job batch: {}", e),
            }

            sleep(Duration::from_secs(self.config.poll_interval_seconds)).await;
        }

        info!("Upload job processor stopped");
    }

    /// Stop the poll loop.
    pub fn stop(&self) {
        info!("Stopping upload job processor");
        self.is_running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use uuid::Uuid;
    use vellum_api_types::{StatusKey, UnifiedUploadJob, UploadStatusRecord};
    use vellum_http::FetchManager;
    use vellum_interfaces::{FileRepository, RepositoryFactory, StatusRepository};
    use vellum_storage::{InMemoryJobQueue, InMemoryRepositoryFactory};

    fn processor_with_mock(url: &str, content: &[u8]) -> (UploadJobProcessor, Arc<dyn RepositoryFactory>, Arc<dyn JobQueue>) {
        let repositories: Arc<dyn RepositoryFactory> = Arc::new(InMemoryRepositoryFactory::new());
        let queue: Arc<dyn JobQueue> = Arc::new(InMemoryJobQueue::new());
        let mut fetcher = FetchManager::new();
        fetcher.set_offline();
        fetcher.add_mock(url, content.to_vec(), Some("image/png"));

        let pipeline = UploadPipeline::new(repositories.clone(), Arc::new(fetcher));
        let processor = UploadJobProcessor::new(queue.clone(), pipeline, ProcessorConfig::default());
        (processor, repositories, queue)
    }

    fn job(url: &str, status_key: StatusKey) -> UnifiedUploadJob {
        UnifiedUploadJob {
            id: Uuid::new_v4(),
            filename: "Wiki.png".to_string(),
            url: url.to_string(),
            requested_by: "Uploader".to_string(),
            ignore_warnings: false,
            leave_message: false,
            status_key,
            queued_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn run_next_on_empty_queue_is_none() {
        let (processor, _, _) = processor_with_mock("http://example.com/Wiki.png", b"png");
        assert!(processor.run_next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn run_next_executes_one_job_to_success() {
        let url = "http://example.com/Wiki.png";
        let (processor, repositories, queue) = processor_with_mock(url, b"png");

        let key = StatusKey::generate();
        repositories
            .status_repository()
            .put(UploadStatusRecord::queued(key.clone(), "Uploader", "Wiki.png"))
            .await
            .unwrap();
        queue.push(job(url, key.clone())).await.unwrap();

        let result = processor.run_next().await.unwrap();
        assert_eq!(result, Some(UploadResult::Success));
        assert!(queue.is_empty().await.unwrap());
        assert!(repositories.file_repository().exists("Wiki.png").await.unwrap());

        let status = repositories.status_repository().get(&key).await.unwrap().unwrap();
        assert_eq!(status.result, UploadResult::Success);
    }

    #[tokio::test]
    async fn fetch_failure_marks_the_job_failed() {
        let (processor, repositories, queue) = processor_with_mock("http://example.com/Wiki.png", b"png");

        // no mock registered for this URL
        let key = StatusKey::generate();
        repositories
            .status_repository()
            .put(UploadStatusRecord::queued(key.clone(), "Uploader", "Gone.png"))
            .await
            .unwrap();
        queue.push(job("http://example.com/Gone.png", key.clone())).await.unwrap();

        let result = processor.run_next().await.unwrap();
        assert_eq!(result, Some(UploadResult::Failed));

        let status = repositories.status_repository().get(&key).await.unwrap().unwrap();
        assert_eq!(status.result, UploadResult::Failed);
        assert!(status.error.is_some());
    }

    #[tokio::test]
    async fn process_batch_drains_up_to_batch_size() {
        let url = "http://example.com/Wiki.png";
        let (processor, repositories, queue) = processor_with_mock(url, b"png");

        for name in ["A.png", "B.png", "C.png"] {
            let key = StatusKey::generate();
            repositories
                .status_repository()
                .put(UploadStatusRecord::queued(key.clone(), "Uploader", name))
                .await
                .unwrap();
            let mut j = job(url, key);
            j.filename = name.to_string();
            j.ignore_warnings = true;
            queue.push(j).await.unwrap();
        }

        let processed = processor.process_batch().await.unwrap();
        assert_eq!(processed, 3);
        assert!(queue.is_empty().await.unwrap());
    }
}
