use axum::{Json, extract::State, http::StatusCode};
use schoolhub_core::{AppError, ErrorResponse};
use schoolhub_models::{AccountSummary, RegisterRequest};
use tracing::instrument;

use super::service::AccountService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create an account on behalf of a user
///
/// The account is active immediately. Creating an admin account requires a
/// super admin caller.
#[utoipa::path(
    post,
    path = "/api/admin/accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountSummary),
        (status = 400, description = "Duplicate username, invalid field or unknown reference", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin, or not a super admin when creating an admin", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(caller = %auth_user.username()))]
pub async fn create_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountSummary>), AppError> {
    let caller_id = auth_user.account_id()?;
    let account = AccountService::create_by_admin(&state.db, caller_id, dto).await?;
    Ok((StatusCode::CREATED, Json(account)))
}
