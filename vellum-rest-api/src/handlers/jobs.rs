//! Job queue inspection endpoint

use axum::{extract::State, response::IntoResponse, Json};

use vellum_interfaces::JobQueue;
use vellum_web::ApiResponse;

use crate::context::UploadsContext;
use crate::errors::RestResult;

/// `GET /jobs` -- snapshot of the upload jobs still waiting in the queue.
pub async fn list_jobs(State(ctx): State<UploadsContext>) -> RestResult<impl IntoResponse> {
    let pending = ctx.queue.pending().await?;
    Ok(Json(ApiResponse::new(pending)))
}
