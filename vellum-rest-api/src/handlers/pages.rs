//! Page endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use tracing::info;

use vellum_core::policy::RIGHT_DELETE;
use vellum_core::Title;
use vellum_interfaces::{PageRepository, RepositoryFactory};
use vellum_web::ApiResponse;

use crate::context::UploadsContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::require_user;
use crate::models::pages::DeletePageResponse;

/// `GET /pages/{title}` -- page lookup by full title.
pub async fn get_page(
    State(ctx): State<UploadsContext>,
    Path(title): Path<String>,
) -> RestResult<impl IntoResponse> {
    let title = normalized_title(&title)?;
    let page = ctx
        .repositories
        .page_repository()
        .find_by_title(&title)
        .await?
        .ok_or_else(|| RestError::NotFound("Page not found".to_string()))?;
    Ok(Json(ApiResponse::new(page)))
}

/// `DELETE /pages/{title}` -- remove a page.
pub async fn delete_page(
    State(ctx): State<UploadsContext>,
    headers: HeaderMap,
    Path(title): Path<String>,
) -> RestResult<impl IntoResponse> {
    let user = require_user(&ctx, &headers).await?;
    if !ctx.policy.user_can(&user.groups, RIGHT_DELETE) {
        return Err(RestError::permission_denied());
    }

    let title = normalized_title(&title)?;
    ctx.repositories.page_repository().delete(&title).await?;

    info!(page = %title, by = %user.name, "deleted page");
    Ok(Json(ApiResponse::new(DeletePageResponse { deleted: title })))
}

fn normalized_title(raw: &str) -> RestResult<String> {
    let title = Title::parse(raw).map_err(|e| RestError::BadRequest(e.to_string()))?;
    Ok(title.full())
}
