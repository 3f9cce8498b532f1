use schoolhub_core::hash_password;
use schoolhub_db::provisioning::{NewAccount, insert_account_with_profile};
use schoolhub_models::{Account, NewAdminProfile, NewProfile};
use sqlx::PgPool;

use crate::CliResult;

/// Creates an active admin account with `is_super_admin` set.
///
/// This is the only way to obtain the first administrator: self-registered
/// admins start inactive and need an existing admin to approve them.
pub async fn create_super_admin(
    db: &PgPool,
    username: &str,
    name: &str,
    email: Option<String>,
    password: &str,
) -> CliResult<Account> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)")
            .bind(username)
            .fetch_one(db)
            .await?;

    if exists {
        return Err(format!("username '{}' is already taken", username).into());
    }

    let password_hash =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let profile = NewProfile::Admin(NewAdminProfile {
        name: name.to_string(),
        email,
    });

    let mut tx = db.begin().await?;

    let account = insert_account_with_profile(
        &mut *tx,
        NewAccount {
            username,
            password_hash: &password_hash,
            profile: &profile,
            is_active: true,
            is_super_admin: true,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(account)
}
