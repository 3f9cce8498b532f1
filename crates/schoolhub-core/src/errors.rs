//! Application error type and the error taxonomy exposed to API callers.
//!
//! Every failure a handler can produce is an [`AppError`]. It carries an
//! [`ErrorKind`] (the machine-readable part of the response), the HTTP status
//! derived from that kind, and the underlying [`anyhow::Error`].
//!
//! Internal errors are logged and replaced with a fixed message before they
//! leave the process, so storage errors and SQL never reach the caller.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::ValidationErrors;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Machine-readable error category returned in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No token, or a token that cannot be read or verified.
    Unauthorized,
    /// A well-formed token whose `exp` claim is in the past.
    TokenExpired,
    /// The caller's role does not satisfy the route.
    Forbidden,
    DuplicateUsername,
    /// Unknown username or wrong password; the two are never distinguished.
    InvalidCredentials,
    /// Credentials are correct but an administrator has not approved the account yet.
    PendingApproval,
    NotFound,
    ValidationError,
    InternalError,
}

impl ErrorKind {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::TokenExpired | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden | Self::PendingApproval => StatusCode::FORBIDDEN,
            Self::DuplicateUsername | Self::ValidationError => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::TokenExpired => "token_expired",
            Self::Forbidden => "forbidden",
            Self::DuplicateUsername => "duplicate_username",
            Self::InvalidCredentials => "invalid_credentials",
            Self::PendingApproval => "pending_approval",
            Self::NotFound => "not_found",
            Self::ValidationError => "validation_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body shape of every error response, used for the OpenAPI schema.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: kind.status(),
            kind,
            error: err.into(),
        }
    }

    fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, Error::msg(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InternalError, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::InternalError, message)
    }

    /// Storage failures. Kept separate from [`AppError::internal`] so call sites
    /// read as what failed.
    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InternalError, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Unauthorized, message)
    }

    pub fn token_expired() -> Self {
        Self::with_message(ErrorKind::TokenExpired, "Token has expired")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Forbidden, message)
    }

    pub fn duplicate_username(username: &str) -> Self {
        Self::with_message(
            ErrorKind::DuplicateUsername,
            format!("Username '{}' is already taken", username),
        )
    }

    pub fn invalid_credentials() -> Self {
        Self::with_message(ErrorKind::InvalidCredentials, "Invalid username or password")
    }

    pub fn pending_approval() -> Self {
        Self::with_message(
            ErrorKind::PendingApproval,
            "Account is pending administrator approval",
        )
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::ValidationError, err)
    }

    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        Self::with_message(ErrorKind::ValidationError, format_validation_errors(errors))
    }

    /// The message sent to the caller.
    pub fn public_message(&self) -> String {
        match self.kind {
            ErrorKind::InternalError => INTERNAL_MESSAGE.to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::InternalError {
            tracing::error!(error = ?self.error, "request failed with internal error");
        }

        let body = Json(json!({
            "kind": self.kind,
            "error": self.public_message(),
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Flattens `validator` errors into one human-readable line.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
