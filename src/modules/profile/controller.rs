use axum::{Json, extract::State};
use schoolhub_core::{AppError, ErrorResponse};
use schoolhub_models::{ChangePasswordRequest, MeResponse, MessageResponse, Profile, ProfileUpdate};
use tracing::instrument;

use super::service::ProfileService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the caller's account and profile
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current account with its profile", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    tag = "Profile",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(username = %auth_user.username()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let me = ProfileService::get_me(&state.db, auth_user.account_id()?).await?;
    Ok(Json(me))
}

/// Update the caller's profile
///
/// The `role` tag of the body must be the caller's own role.
#[utoipa::path(
    put,
    path = "/api/me/profile",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "Invalid field or role mismatch", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Profile",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(username = %auth_user.username()))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileService::update_profile(
        &state.db,
        auth_user.account_id()?,
        auth_user.role()?,
        dto,
    )
    .await?;
    Ok(Json(profile))
}

/// Change the caller's password
#[utoipa::path(
    post,
    path = "/api/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "New password too short", body = ErrorResponse),
        (status = 401, description = "Current password is wrong, or token invalid", body = ErrorResponse)
    ),
    tag = "Profile",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(username = %auth_user.username()))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    ProfileService::change_password(&state.db, auth_user.account_id()?, dto).await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}
