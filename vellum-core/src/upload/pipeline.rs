//! The shared upload pipeline implementation

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use vellum_api_types::{
    StashKey, StashedUpload, UnifiedFile, UnifiedUploadJob, UploadResult, UploadStatusRecord, WarningMap,
};
use vellum_http::{FetchError, UrlFetcher};
use vellum_interfaces::{
    FileRepository, PageRepository, RepositoryFactory, StashRepository, StatusRepository, StorageError,
};

use crate::message::upload_result_section;
use crate::title::{Title, TitleError};

use super::verify::{check_warnings, content_digest};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Title(#[from] TitleError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Uploaded content is empty")]
    EmptyContent,

    #[error("Not a valid session key")]
    UnknownStashKey,
}

/// What an inline pipeline run produced.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    Success {
        file: UnifiedFile,
    },
    /// Content parked in the stash; resumable under `session_key`.
    Warning {
        session_key: StashKey,
        warnings: WarningMap,
    },
}

/// Orchestrates verification, stashing and registration for every upload
/// source. Handlers call it inline; the job processor calls it when it
/// drains the queue.
#[derive(Clone)]
pub struct UploadPipeline {
    repositories: Arc<dyn RepositoryFactory>,
    fetcher: Arc<dyn UrlFetcher>,
}

impl UploadPipeline {
    pub fn new(repositories: Arc<dyn RepositoryFactory>, fetcher: Arc<dyn UrlFetcher>) -> Self {
        Self { repositories, fetcher }
    }

    /// Synchronous copy upload: fetch now and run the pipeline inline.
    pub async fn copy_from_url(
        &self,
        user: &str,
        filename: &str,
        url: &str,
        ignore_warnings: bool,
    ) -> Result<UploadOutcome, UploadError> {
        let fetched = self.fetcher.fetch(url).await?;
        self.process_content(user, filename, fetched.content, fetched.content_type, Some(url), ignore_warnings)
            .await
    }

    /// Run verification and registration on content that is already in hand.
    pub async fn process_content(
        &self,
        user: &str,
        filename: &str,
        content: Vec<u8>,
        mime: Option<String>,
        source_url: Option<&str>,
        ignore_warnings: bool,
    ) -> Result<UploadOutcome, UploadError> {
        if content.is_empty() {
            return Err(UploadError::EmptyContent);
        }

        let title = Title::file(filename)?;
        let name = title.text().to_string();
        let digest = content_digest(&content);

        let files = self.repositories.file_repository();
        let warnings = check_warnings(files, &name, &digest).await?;

        if !warnings.is_empty() && !ignore_warnings {
            let session_key = StashKey::generate(&name);
            debug!(file = %name, key = %session_key, ?warnings, "stashing upload on warnings");
            self.repositories
                .stash_repository()
                .put(StashedUpload {
                    key: session_key.clone(),
                    filename: name,
                    content,
                    digest,
                    mime,
                    source_url: source_url.map(str::to_string),
                    owner: user.to_string(),
                    warnings: warnings.clone(),
                    stashed_at: Utc::now(),
                })
                .await?;
            return Ok(UploadOutcome::Warning { session_key, warnings });
        }

        let file = files
            .register(
                UnifiedFile {
                    name: name.clone(),
                    digest,
                    size: content.len() as u64,
                    mime,
                    source_url: source_url.map(str::to_string),
                    uploaded_by: user.to_string(),
                    uploaded_at: Utc::now(),
                    description_page: title.full(),
                },
                content,
            )
            .await?;

        let pages = self.repositories.page_repository();
        if !pages.exists(&title.full()).await? {
            pages.create(&title.full(), &description_text(&file)).await?;
        }

        info!(file = %file.name, by = %user, "registered upload");
        Ok(UploadOutcome::Success { file })
    }

    /// Resume a stashed upload under its session key. The entry is consumed;
    /// if warnings still apply and are not overridden, the content is parked
    /// again under a fresh key.
    pub async fn resume_stashed(
        &self,
        user: &str,
        key: &StashKey,
        filename: &str,
        ignore_warnings: bool,
    ) -> Result<UploadOutcome, UploadError> {
        let stash = self.repositories.stash_repository();
        let entry = stash.take(key).await?.ok_or(UploadError::UnknownStashKey)?;

        if entry.owner != user {
            // Foreign keys read as unknown; put the entry back untouched.
            stash.put(entry).await?;
            return Err(UploadError::UnknownStashKey);
        }

        debug!(key = %key, file = %filename, "resuming stashed upload");
        self.process_content(
            user,
            filename,
            entry.content,
            entry.mime,
            entry.source_url.as_deref(),
            ignore_warnings,
        )
        .await
    }

    /// Execute a queued copy-upload job end to end, recording progress in
    /// the job's status record. Fetch and verification failures terminate
    /// the job as `Failed`; only storage trouble surfaces as an error.
    pub async fn execute_job(&self, job: &UnifiedUploadJob) -> Result<UploadResult, UploadError> {
        info!(job = %job.id, url = %job.url, file = %job.filename, "running upload job");
        self.put_status(job, UploadResult::Running, None, None, None).await?;

        let fetched = match self.fetcher.fetch(&job.url).await {
            Ok(fetched) => fetched,
            Err(err) => return self.fail_job(job, err.to_string()).await,
        };

        let outcome = match self
            .process_content(
                &job.requested_by,
                &job.filename,
                fetched.content,
                fetched.content_type,
                Some(&job.url),
                job.ignore_warnings,
            )
            .await
        {
            Ok(outcome) => outcome,
            Err(UploadError::Storage(err)) => return Err(err.into()),
            Err(err) => return self.fail_job(job, err.to_string()).await,
        };

        let result = match outcome {
            UploadOutcome::Success { file } => {
                self.put_status(job, UploadResult::Success, Some(file.name.clone()), None, None)
                    .await?;
                if job.leave_message {
                    self.leave_result_message(&job.requested_by, &file.name, UploadResult::Success, None)
                        .await?;
                }
                UploadResult::Success
            }
            UploadOutcome::Warning { session_key, warnings } => {
                self.put_status(
                    job,
                    UploadResult::Warning,
                    Some(job.filename.clone()),
                    Some((session_key, warnings)),
                    None,
                )
                .await?;
                UploadResult::Warning
            }
        };

        Ok(result)
    }

    /// Append the result notice to the uploader's talk page, creating it
    /// when absent.
    pub async fn leave_result_message(
        &self,
        user: &str,
        filename: &str,
        result: UploadResult,
        error: Option<&str>,
    ) -> Result<(), UploadError> {
        let talk = Title::user_talk(user)?;
        let section = upload_result_section(filename, result, error);
        self.repositories.page_repository().append(&talk.full(), &section).await?;
        debug!(page = %talk, "left upload result message");
        Ok(())
    }

    async fn fail_job(&self, job: &UnifiedUploadJob, reason: String) -> Result<UploadResult, UploadError> {
        warn!(job = %job.id, %reason, "upload job failed");
        self.put_status(job, UploadResult::Failed, Some(job.filename.clone()), None, Some(reason.clone()))
            .await?;
        if job.leave_message {
            self.leave_result_message(&job.requested_by, &job.filename, UploadResult::Failed, Some(&reason))
                .await?;
        }
        Ok(UploadResult::Failed)
    }

    async fn put_status(
        &self,
        job: &UnifiedUploadJob,
        result: UploadResult,
        filename: Option<String>,
        stash: Option<(StashKey, WarningMap)>,
        error: Option<String>,
    ) -> Result<(), StorageError> {
        let (session_key, warnings) = match stash {
            Some((key, warnings)) => (Some(key), Some(warnings)),
            None => (None, None),
        };
        self.repositories
            .status_repository()
            .put(UploadStatusRecord {
                key: job.status_key.clone(),
                owner: job.requested_by.clone(),
                result,
                filename,
                session_key,
                warnings,
                error,
                updated_at: Utc::now(),
            })
            .await
    }
}

fn description_text(file: &UnifiedFile) -> String {
    match &file.source_url {
        Some(url) => format!("Copied from {} by [[User:{}]].\n", url, file.uploaded_by),
        None => format!("Uploaded by [[User:{}]].\n", file.uploaded_by),
    }
}
