//! Role-based route guards.
//!
//! Guards verify the token, check the role claim and store the resulting
//! [`AuthUser`] in the request extensions so handlers do not verify twice.
//!
//! ```rust,ignore
//! let admin_routes = Router::new()
//!     .route("/approvals", get(list_pending))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use schoolhub_core::AppError;
use schoolhub_models::Role;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Lets the request through when the caller holds one of `allowed_roles`.
/// An empty slice admits any authenticated caller.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !allowed_roles.is_empty() {
        check_any_role(&auth_user, allowed_roles)?;
    }

    parts.extensions.insert(auth_user);
    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(State(state), req, next, &[]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    let user_role = auth_user.role()?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}, but caller has role: {}",
            allowed_roles
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(" or "),
            user_role
        )));
    }

    Ok(())
}
