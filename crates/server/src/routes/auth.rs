use crate::{dtos::user::UserResponse, error::AppError, state::AppState};
use axum::{Extension, Json, extract::State};
use database::services::user::UserService;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Subject of a validated token. Its absence is reported as a server error.
fn require_subject(sub: Option<&String>) -> Result<&str, AppError> {
    sub.map(String::as_str)
        .ok_or_else(|| AppError::Internal("Token has no subject".to_string()))
}

/// Returns the user record matching the subject of the bearer token
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Successfully authenticated", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "No user matches the token subject"),
        (status = 500, description = "Internal server error - missing subject in claims")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(
    State(state): State<AppState>,
    claims: Extension<DefaultClaims>,
) -> Result<Json<UserResponse>, AppError> {
    let sub = require_subject(claims.sub.as_ref())?;
    let user = UserService::find_by_username(&state.db, sub).await?;

    Ok(Json(user.into()))
}
