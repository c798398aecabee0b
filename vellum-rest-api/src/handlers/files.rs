//! File endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use tracing::info;

use vellum_core::policy::RIGHT_DELETE;
use vellum_core::Title;
use vellum_interfaces::{FileRepository, PageRepository, RepositoryFactory};
use vellum_web::ApiResponse;

use crate::context::UploadsContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::require_user;
use crate::models::files::DeleteFileResponse;

/// `GET /files/{name}` -- file record lookup.
pub async fn get_file(
    State(ctx): State<UploadsContext>,
    Path(name): Path<String>,
) -> RestResult<impl IntoResponse> {
    let name = normalized_file_name(&name)?;
    let file = ctx
        .repositories
        .file_repository()
        .find_by_name(&name)
        .await?
        .ok_or_else(|| RestError::NotFound("File not found".to_string()))?;
    Ok(Json(ApiResponse::new(file)))
}

/// `DELETE /files/{name}` -- remove a file, its description page, and leave
/// an archive entry behind.
pub async fn delete_file(
    State(ctx): State<UploadsContext>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> RestResult<impl IntoResponse> {
    let user = require_user(&ctx, &headers).await?;
    if !ctx.policy.user_can(&user.groups, RIGHT_DELETE) {
        return Err(RestError::permission_denied());
    }

    let name = normalized_file_name(&name)?;
    let file = ctx.repositories.file_repository().delete(&name).await?;

    let pages = ctx.repositories.page_repository();
    let description_page = if pages.exists(&file.description_page).await? {
        pages.delete(&file.description_page).await?;
        Some(file.description_page.clone())
    } else {
        None
    };

    info!(file = %name, by = %user.name, "deleted file");
    Ok(Json(ApiResponse::new(DeleteFileResponse {
        deleted: name,
        description_page,
    })))
}

fn normalized_file_name(raw: &str) -> RestResult<String> {
    let title = Title::file(raw).map_err(|e| RestError::BadRequest(e.to_string()))?;
    Ok(title.text().to_string())
}
