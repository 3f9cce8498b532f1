//! Token extraction and the [`AuthUser`] extractor.
//!
//! The token is read from the cookie named by `COOKIE_NAME`. Non-browser
//! clients may send it as `Authorization: Bearer <token>` instead; the cookie
//! wins when both are present. Verification is purely cryptographic, no
//! database lookup happens here.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use schoolhub_auth::{Claims, verify_token};
use schoolhub_core::AppError;
use schoolhub_models::{AccountId, Role};

use crate::state::AppState;

/// Verified claims of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn account_id(&self) -> Result<AccountId, AppError> {
        self.0
            .account_id()
            .map(AccountId::from_uuid)
            .ok_or_else(|| AppError::unauthorized("Invalid account id in token"))
    }

    /// A role claim outside the four known roles is treated as an unreadable
    /// token.
    pub fn role(&self) -> Result<Role, AppError> {
        self.0
            .role
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid role in token"))
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

/// Returns the raw token from the cookie, falling back to a Bearer header.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified by a route layer.
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let token = extract_token(&parts.headers, &state.cookie_config.name)
            .ok_or_else(|| AppError::unauthorized("Missing authentication token"))?;

        let claims = verify_token(&token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn claims(sub: String, role: &str) -> Claims {
        Claims {
            sub,
            username: "t1".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_account_id() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser(claims(id.to_string(), "teacher"));
        assert_eq!(auth_user.account_id().unwrap().into_inner(), id);
        assert_eq!(auth_user.username(), "t1");
    }

    #[test]
    fn test_invalid_subject_is_unauthorized() {
        let auth_user = AuthUser(claims("not-a-uuid".to_string(), "teacher"));
        let err = auth_user.account_id().unwrap_err();
        assert_eq!(err.kind, schoolhub_core::ErrorKind::Unauthorized);
    }

    #[test]
    fn test_role_parsing() {
        let auth_user = AuthUser(claims(Uuid::new_v4().to_string(), "parent"));
        assert_eq!(auth_user.role().unwrap(), Role::Parent);

        let auth_user = AuthUser(claims(Uuid::new_v4().to_string(), "system_admin"));
        assert!(auth_user.role().is_err());
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token=from-cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(
            extract_token(&headers, "token").as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_extract_token_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(
            extract_token(&headers, "token").as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn test_extract_token_custom_cookie_name() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("other=1; session=abc"),
        );

        assert_eq!(extract_token(&headers, "session").as_deref(), Some("abc"));
        assert_eq!(extract_token(&headers, "token"), None);
    }

    #[test]
    fn test_extract_token_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(extract_token(&headers, "token"), None);
    }
}
