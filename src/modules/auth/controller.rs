use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use schoolhub_config::CookieConfig;
use schoolhub_core::{AppError, ErrorResponse};
use schoolhub_models::{AccountSummary, LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use tracing::instrument;

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// The cookie carrying the access token. Session-scoped: the token's own
/// `exp` claim bounds its lifetime.
pub fn token_cookie(config: &CookieConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .path("/")
        .build()
}

/// Register a new account
///
/// Students and parents can log in straight away. Teachers and admins wait
/// for an administrator's approval.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account registered", body = AccountSummary),
        (status = 400, description = "Duplicate username, invalid field or unknown reference", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(username = %dto.username))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<AccountSummary>, AppError> {
    let account = AuthService::register(&state.db, dto).await?;
    Ok(Json(account))
}

/// Log in and receive the token cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token cookie set", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account pending approval", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto), fields(username = %dto.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    let cookie = token_cookie(&state.cookie_config, response.access_token.clone());
    Ok((jar.add(cookie), Json(response)))
}

/// Log out by clearing the token cookie
///
/// The token itself stays valid until it expires.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Cookie cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let removal = Cookie::build((state.cookie_config.name.clone(), "")).path("/");
    (
        jar.remove(removal),
        Json(MessageResponse::new("Logged out successfully")),
    )
}
