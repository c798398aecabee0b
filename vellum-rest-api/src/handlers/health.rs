//! Health check endpoint

use axum::{extract::State, response::IntoResponse, Json};

use vellum_interfaces::RepositoryFactory;

use crate::context::UploadsContext;
use crate::errors::RestResult;
use crate::models::common::HealthResponse;

/// Health check endpoint
///
/// Verifies storage is reachable and reports the overall service status.
pub async fn health_check(State(ctx): State<UploadsContext>) -> RestResult<impl IntoResponse> {
    ctx.repositories.health_check().await?;
    Ok(Json(HealthResponse::healthy()))
}
