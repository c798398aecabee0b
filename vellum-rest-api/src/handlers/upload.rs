//! The upload action
//!
//! One endpoint covers every upload source: a URL (inline or deferred via
//! the job queue), a direct base64 payload, a stashed upload resumed by
//! session key, and polling a deferred upload by status key. Parameter
//! checks run in a fixed order so each violation reports its contractual
//! message.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use base64::Engine;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use vellum_api_types::{StashKey, StatusKey, UnifiedUploadJob, UnifiedUser, UploadStatusRecord};
use vellum_core::policy::{RIGHT_UPLOAD, RIGHT_UPLOAD_BY_URL};
use vellum_core::UploadOutcome;
use vellum_interfaces::{JobQueue, RepositoryFactory, StatusRepository};

use crate::context::UploadsContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::require_user;
use crate::models::upload::{UploadBody, UploadRequest, UploadResponse};

/// `POST /upload`
pub async fn upload(
    State(ctx): State<UploadsContext>,
    headers: HeaderMap,
    Json(req): Json<UploadRequest>,
) -> RestResult<impl IntoResponse> {
    let user = require_user(&ctx, &headers).await?;

    let token = req
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(RestError::missing_token)?;
    if token != user.edit_token {
        return Err(RestError::invalid_token());
    }

    if req.sessionkey.is_none() && req.file.is_none() && req.url.is_none() && req.statuskey.is_none() {
        return Err(RestError::missing_source());
    }

    // Status polling needs no filename and no upload rights.
    if let Some(statuskey) = &req.statuskey {
        return poll_status(&ctx, &user, statuskey).await;
    }

    let filename = req
        .filename
        .as_deref()
        .filter(|f| !f.is_empty())
        .ok_or_else(RestError::missing_filename)?;

    if !ctx.policy.uploads_enabled {
        return Err(RestError::uploads_disabled());
    }
    if !ctx.policy.user_can(&user.groups, RIGHT_UPLOAD) {
        return Err(RestError::permission_denied());
    }
    if req.url.is_some() && !ctx.policy.user_can(&user.groups, RIGHT_UPLOAD_BY_URL) {
        return Err(RestError::permission_denied());
    }

    if let Some(sessionkey) = &req.sessionkey {
        let key = StashKey::from(sessionkey.as_str());
        let outcome = ctx
            .pipeline
            .resume_stashed(&user.name, &key, filename, req.ignorewarnings)
            .await?;
        return Ok(Json(UploadResponse::from(body_from_outcome(outcome))));
    }

    if let Some(url) = &req.url {
        return copy_upload(&ctx, &user, filename, url, &req).await;
    }

    // Remaining source: a direct base64 payload.
    let encoded = req.file.as_deref().unwrap_or_default();
    let content = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| RestError::bad_file_encoding())?;
    let outcome = ctx
        .pipeline
        .process_content(&user.name, filename, content, None, None, req.ignorewarnings)
        .await?;
    Ok(Json(UploadResponse::from(body_from_outcome(outcome))))
}

/// URL-sourced upload, inline or deferred.
async fn copy_upload(
    ctx: &UploadsContext,
    user: &UnifiedUser,
    filename: &str,
    url: &str,
    req: &UploadRequest,
) -> RestResult<Json<UploadResponse>> {
    if !ctx.policy.copy_uploads_enabled {
        return Err(RestError::copy_uploads_disabled());
    }

    let parsed = url::Url::parse(url).map_err(|_| RestError::bad_upload_url())?;
    if !ctx.scheme_allowed(parsed.scheme()) {
        return Err(RestError::bad_upload_url());
    }

    if !req.asyncdownload {
        let outcome = ctx
            .pipeline
            .copy_from_url(&user.name, filename, url, req.ignorewarnings)
            .await?;
        return Ok(Json(UploadResponse::from(body_from_outcome(outcome))));
    }

    if !ctx.policy.async_uploads_enabled {
        return Err(RestError::async_uploads_disabled());
    }
    if req.leavemessage && !req.ignorewarnings {
        return Err(RestError::leavemessage_without_ignorewarnings());
    }

    let status_key = StatusKey::generate();
    let job = UnifiedUploadJob {
        id: Uuid::new_v4(),
        filename: filename.to_string(),
        url: url.to_string(),
        requested_by: user.name.clone(),
        ignore_warnings: req.ignorewarnings,
        leave_message: req.leavemessage,
        status_key: status_key.clone(),
        queued_at: Utc::now(),
    };

    ctx.repositories
        .status_repository()
        .put(UploadStatusRecord::queued(status_key.clone(), &user.name, filename))
        .await?;
    ctx.queue.push(job).await?;

    info!(file = %filename, url = %url, by = %user.name, "queued async copy upload");
    Ok(Json(UploadResponse::from(UploadBody::queued(status_key))))
}

/// Status-key poll: report the stored record, owner-scoped.
async fn poll_status(ctx: &UploadsContext, user: &UnifiedUser, statuskey: &str) -> RestResult<Json<UploadResponse>> {
    let key = StatusKey::from(statuskey);
    let record = ctx
        .repositories
        .status_repository()
        .get(&key)
        .await?
        .filter(|record| record.owner == user.name)
        .ok_or_else(RestError::missing_status_result)?;

    debug!(key = %key, result = %record.result, "polled upload status");
    Ok(Json(UploadResponse::from(UploadBody::from_status(record))))
}

fn body_from_outcome(outcome: UploadOutcome) -> UploadBody {
    match outcome {
        UploadOutcome::Success { file } => UploadBody::success(file.name),
        UploadOutcome::Warning { session_key, warnings } => UploadBody::warning(session_key, warnings),
    }
}
