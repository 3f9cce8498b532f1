use anyhow::anyhow;
use schoolhub_core::AppError;
use schoolhub_models::{Account, AccountId, AccountSummary, PendingAccount, Role};
use schoolhub_observability::track_approval_decision;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::modules::profile::service::ProfileService;

pub struct ApprovalService;

impl ApprovalService {
    /// Inactive accounts, newest first, each with its profile's display fields.
    #[instrument(skip(db))]
    pub async fn list_pending(db: &PgPool) -> Result<Vec<PendingAccount>, AppError> {
        let mut conn = db.acquire().await.map_err(AppError::database)?;

        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password, role, is_active, created_at
            FROM accounts
            WHERE is_active = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::database)?;

        let mut pending = Vec::with_capacity(accounts.len());
        for account in &accounts {
            let profile = ProfileService::find_profile(&mut *conn, account.id, account.role)
                .await
                .map_err(AppError::database)?;

            if profile.is_none() {
                warn!(account_id = %account.id, role = %account.role, "pending account has no profile");
            }

            pending.push(PendingAccount::new(
                account,
                profile.map(|p| p.display()),
            ));
        }

        Ok(pending)
    }

    /// Activates an account. Approving an already active account succeeds
    /// and leaves the row untouched.
    #[instrument(skip(db))]
    pub async fn approve(db: &PgPool, account_id: AccountId) -> Result<AccountSummary, AppError> {
        let activated = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1 AND NOT is_active
            RETURNING id, username, password, role, is_active, created_at
            "#,
        )
        .bind(account_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if let Some(account) = activated {
            track_approval_decision("approved");
            info!(%account_id, role = %account.role, "account approved");
            return Ok(account.into());
        }

        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, role, is_active, created_at FROM accounts WHERE id = $1",
        )
        .bind(account_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Account not found")))?;

        debug!(%account_id, "account already active");
        Ok(account.into())
    }

    /// Deletes the account and its profile together.
    ///
    /// The profile table is chosen by the account's role; if it holds no row
    /// for this id nothing is deleted and `NotFound` is returned.
    #[instrument(skip(db))]
    pub async fn reject(db: &PgPool, account_id: AccountId) -> Result<(), AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM accounts WHERE id = $1 FOR UPDATE")
            .bind(account_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Account not found")))?;

        if role == Role::Parent {
            let children = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM student_profiles WHERE parent_id = $1",
            )
            .bind(account_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::database)?;

            if children > 0 {
                return Err(AppError::validation(anyhow!(
                    "Parent is still referenced by {} student(s)",
                    children
                )));
            }
        }

        let delete_profile = match role {
            Role::Admin => "DELETE FROM admin_profiles WHERE id = $1",
            Role::Teacher => "DELETE FROM teacher_profiles WHERE id = $1",
            Role::Student => "DELETE FROM student_profiles WHERE id = $1",
            Role::Parent => "DELETE FROM parent_profiles WHERE id = $1",
        };

        let deleted = sqlx::query(delete_profile)
            .bind(account_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        if deleted.rows_affected() == 0 {
            warn!(%account_id, %role, "no profile matches the account role, rolling back");
            return Err(AppError::not_found(anyhow!("Profile not found for account")));
        }

        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(account_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        track_approval_decision("rejected");
        info!(%account_id, %role, "account rejected");

        Ok(())
    }
}
