//! Edit token endpoint

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::context::UploadsContext;
use crate::errors::RestResult;
use crate::handlers::require_user;
use crate::models::common::TokenResponse;

/// `GET /auth/token` -- the acting user's edit token.
pub async fn get_edit_token(
    State(ctx): State<UploadsContext>,
    headers: HeaderMap,
) -> RestResult<impl IntoResponse> {
    let user = require_user(&ctx, &headers).await?;
    Ok(Json(TokenResponse {
        token: user.edit_token,
    }))
}
