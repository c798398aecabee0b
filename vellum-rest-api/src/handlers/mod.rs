//! REST API request handlers

mod auth;
mod files;
mod health;
mod jobs;
mod pages;
mod upload;

pub use auth::get_edit_token;
pub use files::{delete_file, get_file};
pub use health::health_check;
pub use jobs::list_jobs;
pub use pages::{delete_page, get_page};
pub use upload::upload;

use axum::http::HeaderMap;
use vellum_api_types::UnifiedUser;
use vellum_interfaces::{RepositoryFactory, UserRepository};

use crate::context::UploadsContext;
use crate::errors::{RestError, RestResult};

/// Header carrying the acting user's name.
pub const API_USER_HEADER: &str = "x-api-user";

/// Resolve the acting user from the request headers.
pub(crate) async fn require_user(ctx: &UploadsContext, headers: &HeaderMap) -> RestResult<UnifiedUser> {
    let name = headers
        .get(API_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(RestError::unknown_user)?;

    ctx.repositories
        .user_repository()
        .find_by_name(name)
        .await?
        .ok_or_else(RestError::unknown_user)
}
