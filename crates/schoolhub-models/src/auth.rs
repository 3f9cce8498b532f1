//! Request and response bodies for registration, login and self-service.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::accounts::AccountSummary;
use crate::profiles::{NewProfile, Profile};

/// Usernames are ASCII letters, digits, `.`, `_` and `-`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset").with_message(Cow::Borrowed(
            "username may only contain letters, digits, '.', '_' and '-'",
        )))
    }
}

/// Body of `POST /api/auth/register` and `POST /api/admin/accounts`.
///
/// `role` and the role's profile fields sit at the top level next to the
/// credentials:
///
/// ```json
/// {"username": "t1", "password": "secret123", "role": "teacher",
///  "name": "Tess", "surname": "Smith", "subject_ids": []}
/// ```
///
/// Deriving `Validate` covers the credentials only. Profile fields are checked
/// by calling `profile.validate()` separately.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        length(
            min = 1,
            max = 32,
            message = "username must be between 1 and 32 characters"
        ),
        custom(function = "validate_username")
    )]
    #[schema(example = "t1")]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[serde(flatten)]
    pub profile: NewProfile,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "t1")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Successful login. The same token is also set as an `HttpOnly` cookie.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AccountSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "current_password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "new_password must be at least 8 characters"))]
    pub new_password: String,
}

/// The caller's own account together with its profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MeResponse {
    pub account: AccountSummary,
    pub profile: Profile,
}
