use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
};
use schoolhub_core::{AppError, ErrorResponse};
use schoolhub_models::{AccountId, AccountSummary, MessageResponse, PendingAccount};
use tracing::instrument;

use super::service::ApprovalService;
use crate::state::AppState;

fn parse_account_id(raw: &str) -> Result<AccountId, AppError> {
    raw.parse::<AccountId>()
        .map_err(|_| AppError::validation(anyhow!("Invalid account id '{}'", raw)))
}

/// List accounts waiting for approval
#[utoipa::path(
    get,
    path = "/api/admin/approvals",
    responses(
        (status = 200, description = "Pending accounts, newest first", body = Vec<PendingAccount>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingAccount>>, AppError> {
    let pending = ApprovalService::list_pending(&state.db).await?;
    Ok(Json(pending))
}

/// Approve a pending account
#[utoipa::path(
    patch,
    path = "/api/admin/approvals/{id}/approve",
    params(("id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account is active", body = AccountSummary),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn approve_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountSummary>, AppError> {
    let account = ApprovalService::approve(&state.db, parse_account_id(&id)?).await?;
    Ok(Json(account))
}

/// Reject an account, deleting it with its profile
#[utoipa::path(
    delete,
    path = "/api/admin/approvals/{id}/reject",
    params(("id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account and profile deleted", body = MessageResponse),
        (status = 400, description = "Parent is still referenced by students", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Account or matching profile not found", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reject_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    ApprovalService::reject(&state.db, parse_account_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Account rejected")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::ErrorKind;

    #[test]
    fn test_parse_account_id() {
        let id = AccountId::new();
        assert_eq!(parse_account_id(&id.to_string()).unwrap(), id);

        let err = parse_account_id("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValidationError);
    }
}
